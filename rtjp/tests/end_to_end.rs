//! Mock planner → report → store → report again from disk.

use std::path::PathBuf;

use chrono::NaiveDate;
use rtjp::Error;
use rtjp::config::Config;
use rtjp::domain::FareClass;
use rtjp::ojp::{JourneyPlanner, MockOjpClient, OjpError};
use rtjp::report::REPEATED_TIME;
use rtjp::run::{query_and_report, report_saved};
use rtjp::store::{ResponseStore, StoreError};

fn mock_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/mock_responses")
}

fn friday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn config(store_dir: &std::path::Path) -> Config {
    let mut config = Config::with_credentials("user", "secret");
    config.store_dir = store_dir.to_path_buf();
    config
}

#[tokio::test]
async fn query_prints_wanted_fares_and_bulletins() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let store = ResponseStore::new(&config.store_dir);
    let planner = MockOjpClient::new(mock_dir()).unwrap();

    let mut out = Vec::new();
    query_and_report(&config, &planner, &store, friday(), &mut out)
        .await
        .unwrap();

    let expected = format!(
        "Fri 2024-03-15 08:05 = £23.10  Off-Peak Single\n\
         {REPEATED_TIME} = £23.10  Advance Single\n\
         {REPEATED_TIME} = £45.50  Anytime Return\n\
         Fri 2024-03-15 16:32 = £23.10  Off-Peak Single\n\
         Engineering works between Montrose and Arbroath. Reduced catering. \n"
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert!(store.path_for(friday()).exists());
}

#[tokio::test]
async fn saved_response_reports_identically() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let store = ResponseStore::new(&config.store_dir);
    let planner = MockOjpClient::new(mock_dir()).unwrap();

    let mut queried = Vec::new();
    let live = query_and_report(&config, &planner, &store, friday(), &mut queried)
        .await
        .unwrap();

    let mut reloaded = Vec::new();
    let saved = report_saved(&config, &store, friday(), &mut reloaded).unwrap();

    assert_eq!(live, saved);
    assert_eq!(queried, reloaded);
}

#[tokio::test]
async fn saved_response_matches_planner_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let store = ResponseStore::new(&config.store_dir);
    let planner = MockOjpClient::new(mock_dir()).unwrap();

    let planned = planner.plan(&config.request_for(friday())).await.unwrap();
    query_and_report(&config, &planner, &store, friday(), &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(store.load(friday()).unwrap(), planned);
    assert_eq!(planned.outward_journey.len(), 2);
    assert_eq!(planned.inward_journey.len(), 2);
    assert!(planned.inward_journey[1].timetable.scheduled.arrival.is_none());
}

#[tokio::test]
async fn first_class_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.report.fare_class = FareClass::First;
    let store = ResponseStore::new(&config.store_dir);
    let planner = MockOjpClient::new(mock_dir()).unwrap();

    let report = query_and_report(&config, &planner, &store, friday(), &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(
        report.fare_lines,
        vec!["Fri 2024-03-15 08:05 = £90.00  Anytime Return First".to_string()]
    );
}

#[test]
fn missing_saved_response_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let store = ResponseStore::new(&config.store_dir);

    let mut out = Vec::new();
    let result = report_saved(&config, &store, friday(), &mut out);

    assert!(matches!(
        result,
        Err(Error::Store(StoreError::NotFound { date, .. })) if date == friday()
    ));
    assert!(out.is_empty());
}

#[tokio::test]
async fn failed_query_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let store = ResponseStore::new(&config.store_dir);
    let planner = MockOjpClient::new(mock_dir()).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();

    let mut out = Vec::new();
    let result = query_and_report(&config, &planner, &store, date, &mut out).await;

    assert!(matches!(
        result,
        Err(Error::Service(OjpError::Api { status: 404, .. }))
    ));
    assert!(out.is_empty());
    assert!(!store.path_for(date).exists());
}
