//! The normalized journey-plan record.
//!
//! A `JourneyResponse` is what the rest of the program works with: it is
//! built once per query (freshly from the service, or reloaded from disk)
//! and only ever read afterwards. Field names follow the service's
//! camelCase names so a persisted record reads like the service response.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Fare;

/// Outward and inward journeys returned for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResponse {
    pub outward_journey: Vec<Journey>,
    pub inward_journey: Vec<Journey>,
}

/// One scheduled trip with its fares and live bulletins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub timetable: Timetable,
    pub fare: Vec<Fare>,
    pub service_bulletins: Vec<Bulletin>,
}

impl Journey {
    /// Scheduled departure, local wall-clock time.
    pub fn departure(&self) -> NaiveDateTime {
        self.timetable.scheduled.departure
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    pub scheduled: ScheduledTimes,
}

/// Scheduled times as local timestamps without a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTimes {
    pub departure: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<NaiveDateTime>,
}

/// A live service advisory. `cleared` means it no longer applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bulletin {
    pub cleared: bool,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FareClass, Pence};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn departure_reads_scheduled_time() {
        let journey = Journey {
            timetable: Timetable {
                scheduled: ScheduledTimes {
                    departure: at(8, 5),
                    arrival: None,
                },
            },
            fare: vec![],
            service_bulletins: vec![],
        };
        assert_eq!(journey.departure(), at(8, 5));
    }

    #[test]
    fn serializes_with_service_names_and_naive_times() {
        let response = JourneyResponse {
            outward_journey: vec![Journey {
                timetable: Timetable {
                    scheduled: ScheduledTimes {
                        departure: at(8, 5),
                        arrival: Some(at(8, 26)),
                    },
                },
                fare: vec![Fare {
                    total_price: Pence(560),
                    fare_class: FareClass::Standard,
                    description: "Off-Peak Day Return".into(),
                }],
                service_bulletins: vec![Bulletin {
                    cleared: false,
                    description: "Engineering works".into(),
                }],
            }],
            inward_journey: vec![],
        };

        let json = serde_json::to_value(&response).unwrap();
        let journey = &json["outwardJourney"][0];
        assert_eq!(
            journey["timetable"]["scheduled"]["departure"],
            "2024-03-15T08:05:00"
        );
        assert_eq!(journey["serviceBulletins"][0]["cleared"], false);
        assert_eq!(json["inwardJourney"], serde_json::json!([]));
    }
}
