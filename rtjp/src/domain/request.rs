//! What we ask the journey planner for.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{Crs, FareClass};

/// Passenger composition for fare quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passengers {
    pub adult: u8,
    pub child: u8,
}

impl Default for Passengers {
    fn default() -> Self {
        Self { adult: 1, child: 0 }
    }
}

/// A single realtime journey-plan query for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyRequest {
    pub origin: Crs,
    pub destination: Crs,
    /// Latest outward departure considered.
    pub outward_depart_by: NaiveDateTime,
    /// Latest inward departure considered.
    pub inward_depart_by: NaiveDateTime,
    pub fare_class: FareClass,
    pub passengers: Passengers,
    pub direct_trains: bool,
    pub include_additional_information: bool,
}

impl JourneyRequest {
    /// Build a return-trip request on `date` using the given depart-by times.
    pub fn for_day(
        origin: Crs,
        destination: Crs,
        date: NaiveDate,
        outward_by: NaiveTime,
        inward_by: NaiveTime,
        fare_class: FareClass,
    ) -> Self {
        Self {
            origin,
            destination,
            outward_depart_by: date.and_time(outward_by),
            inward_depart_by: date.and_time(inward_by),
            fare_class,
            passengers: Passengers::default(),
            direct_trains: false,
            include_additional_information: false,
        }
    }

    pub fn with_passengers(mut self, passengers: Passengers) -> Self {
        self.passengers = passengers;
        self
    }

    pub fn with_direct_trains(mut self, direct: bool) -> Self {
        self.direct_trains = direct;
        self
    }

    pub fn with_additional_information(mut self, include: bool) -> Self {
        self.include_additional_information = include;
        self
    }

    /// The calendar day this request is for.
    pub fn date(&self) -> NaiveDate {
        self.outward_depart_by.date()
    }
}
