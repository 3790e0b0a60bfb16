//! Raw journey-plan response DTOs.
//!
//! These are deserialized from the sanitized XML tree, so every scalar
//! arrives as a string and a repeated element with a single occurrence looks
//! like a lone mapping. Fields are `Option` because the service omits
//! elements freely; `convert` decides which absences are errors.

use serde::{Deserialize, Deserializer};

/// Body of `RealtimeJourneyPlanResponse`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJourneyPlan {
    #[serde(default, deserialize_with = "one_or_many")]
    pub outward_journey: Vec<RawJourney>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub inward_journey: Vec<RawJourney>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJourney {
    pub timetable: Option<RawTimetable>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub fare: Vec<RawFare>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub service_bulletins: Vec<RawBulletin>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTimetable {
    pub scheduled: Option<RawTimes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTimes {
    pub departure: Option<String>,
    pub arrival: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFare {
    pub total_price: Option<Scalar>,
    pub fare_class: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBulletin {
    pub cleared: Option<Scalar>,
    pub description: Option<String>,
}

/// A leaf value: text from XML, or an already-typed JSON scalar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Accept a sequence, a single element, or nothing at all.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}
