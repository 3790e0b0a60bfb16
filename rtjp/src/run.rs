//! The two things a run can do: report on a saved response, or query afresh.

use std::io::Write;

use chrono::NaiveDate;
use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::ojp::JourneyPlanner;
use crate::report::{Report, render};
use crate::store::ResponseStore;

/// Load the response saved for `date` and write its report to `out`.
pub fn report_saved(
    config: &Config,
    store: &ResponseStore,
    date: NaiveDate,
    out: &mut impl Write,
) -> Result<Report, Error> {
    let response = store.load(date)?;
    let report = render(&response, &config.report);
    write_report(&report, out)?;
    Ok(report)
}

/// Query the planner for `date`, write the report to `out`, then save the
/// response. Nothing is printed or saved if the query fails.
pub async fn query_and_report<P: JourneyPlanner>(
    config: &Config,
    planner: &P,
    store: &ResponseStore,
    date: NaiveDate,
    out: &mut impl Write,
) -> Result<Report, Error> {
    let request = config.request_for(date);
    info!(
        origin = %request.origin,
        destination = %request.destination,
        %date,
        "querying journey planner"
    );

    let response = planner.plan(&request).await?;
    let report = render(&response, &config.report);
    write_report(&report, out)?;

    store.save(date, &response)?;
    Ok(report)
}

fn write_report(report: &Report, out: &mut impl Write) -> Result<(), Error> {
    write!(out, "{report}")?;
    out.flush()?;
    Ok(())
}
