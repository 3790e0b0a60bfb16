//! Run configuration.
//!
//! Built once at startup and passed by reference; nothing reads globals.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{Crs, FareClass, JourneyRequest, Passengers};
use crate::ojp::OjpConfig;
use crate::report::ReportFilter;

const DEFAULT_ORIGIN: Crs = Crs::from_static(b"ABD");
const DEFAULT_DESTINATION: Crs = Crs::from_static(b"ARB");
const DEFAULT_OUTWARD_DEPART_BY: NaiveTime = hm(8, 0);
const DEFAULT_INWARD_DEPART_BY: NaiveTime = hm(16, 0);

const fn hm(hour: u32, min: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, 0) {
        Some(time) => time,
        None => panic!("not a time of day"),
    }
}

/// What to ask the journey planner for.
#[derive(Debug, Clone)]
pub struct JourneyDefaults {
    pub origin: Crs,
    pub destination: Crs,
    /// Outward trains departing by this time.
    pub outward_depart_by: NaiveTime,
    /// Inward trains departing by this time.
    pub inward_depart_by: NaiveTime,
    pub passengers: Passengers,
    pub direct_trains: bool,
    pub include_additional_information: bool,
}

impl JourneyDefaults {
    pub fn new(origin: Crs, destination: Crs) -> Self {
        Self {
            origin,
            destination,
            outward_depart_by: DEFAULT_OUTWARD_DEPART_BY,
            inward_depart_by: DEFAULT_INWARD_DEPART_BY,
            passengers: Passengers::default(),
            direct_trains: false,
            include_additional_information: false,
        }
    }

    /// The request for `date` in `fare_class`.
    pub fn request_for(&self, date: NaiveDate, fare_class: FareClass) -> JourneyRequest {
        JourneyRequest::for_day(
            self.origin,
            self.destination,
            date,
            self.outward_depart_by,
            self.inward_depart_by,
            fare_class,
        )
        .with_passengers(self.passengers)
        .with_direct_trains(self.direct_trains)
        .with_additional_information(self.include_additional_information)
    }
}

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub service: OjpConfig,
    pub journey: JourneyDefaults,
    pub report: ReportFilter,
    /// Directory holding saved responses.
    pub store_dir: PathBuf,
}

impl Config {
    /// Built-in defaults without credentials.
    ///
    /// Credentials are only needed for a live query; see
    /// [`OjpConfig::with_credentials_from_env`].
    pub fn new() -> Self {
        Self::with_credentials("", "")
    }

    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            service: OjpConfig::new(username, password),
            journey: JourneyDefaults::new(DEFAULT_ORIGIN, DEFAULT_DESTINATION),
            report: ReportFilter::default(),
            store_dir: PathBuf::from("."),
        }
    }

    /// The planner request for `date`, in the report's fare class.
    pub fn request_for(&self, date: NaiveDate) -> JourneyRequest {
        self.journey.request_for(date, self.report.fare_class.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
