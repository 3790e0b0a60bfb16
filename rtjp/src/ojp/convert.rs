//! Conversion from raw response DTOs to the normalized record.
//!
//! Anything the report relies on must be present and parseable; a journey
//! without a timetable or a fare without a price means the service changed
//! shape, and we fail the whole response rather than print half of it.

use chrono::{DateTime, NaiveDateTime};

use crate::domain::{
    Bulletin, Fare, FareClass, Journey, JourneyResponse, Pence, ScheduledTimes, Timetable,
};

use super::types::{RawBulletin, RawFare, RawJourney, RawJourneyPlan, RawTimes, Scalar};

/// The service response did not have the shape we expect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Field present but unparseable
    #[error("invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// Tree could not be read as a journey plan at all
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Problem inside one journey
    #[error("{direction} journey {index}: {source}")]
    InJourney {
        direction: &'static str,
        index: usize,
        source: Box<ConversionError>,
    },
}

/// Convert a whole journey plan, outward then inward, keeping order.
pub fn convert_journey_plan(raw: &RawJourneyPlan) -> Result<JourneyResponse, ConversionError> {
    Ok(JourneyResponse {
        outward_journey: convert_journeys("outward", &raw.outward_journey)?,
        inward_journey: convert_journeys("inward", &raw.inward_journey)?,
    })
}

fn convert_journeys(
    direction: &'static str,
    raw: &[RawJourney],
) -> Result<Vec<Journey>, ConversionError> {
    raw.iter()
        .enumerate()
        .map(|(index, journey)| {
            convert_journey(journey).map_err(|e| ConversionError::InJourney {
                direction,
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Convert a single journey.
pub fn convert_journey(raw: &RawJourney) -> Result<Journey, ConversionError> {
    let scheduled = raw
        .timetable
        .as_ref()
        .ok_or(ConversionError::MissingField("timetable"))?
        .scheduled
        .as_ref()
        .ok_or(ConversionError::MissingField("timetable.scheduled"))?;

    let fare = raw.fare.iter().map(convert_fare).collect::<Result<Vec<_>, _>>()?;
    let service_bulletins = raw
        .service_bulletins
        .iter()
        .map(convert_bulletin)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Journey {
        timetable: Timetable {
            scheduled: convert_times(scheduled)?,
        },
        fare,
        service_bulletins,
    })
}

fn convert_times(raw: &RawTimes) -> Result<ScheduledTimes, ConversionError> {
    let departure = raw
        .departure
        .as_deref()
        .ok_or(ConversionError::MissingField("timetable.scheduled.departure"))?;

    Ok(ScheduledTimes {
        departure: parse_local_datetime("departure", departure)?,
        arrival: raw
            .arrival
            .as_deref()
            .map(|a| parse_local_datetime("arrival", a))
            .transpose()?,
    })
}

fn convert_fare(raw: &RawFare) -> Result<Fare, ConversionError> {
    let price = raw
        .total_price
        .as_ref()
        .ok_or(ConversionError::MissingField("fare.totalPrice"))?;
    let fare_class = raw
        .fare_class
        .as_ref()
        .ok_or(ConversionError::MissingField("fare.fareClass"))?;
    let description = raw
        .description
        .as_ref()
        .ok_or(ConversionError::MissingField("fare.description"))?;

    Ok(Fare {
        total_price: Pence(parse_int("fare.totalPrice", price)?),
        fare_class: FareClass::from(fare_class.clone()),
        description: description.clone(),
    })
}

fn convert_bulletin(raw: &RawBulletin) -> Result<Bulletin, ConversionError> {
    let cleared = raw
        .cleared
        .as_ref()
        .ok_or(ConversionError::MissingField("serviceBulletins.cleared"))?;
    let description = raw
        .description
        .as_ref()
        .ok_or(ConversionError::MissingField("serviceBulletins.description"))?;

    Ok(Bulletin {
        cleared: parse_bool("serviceBulletins.cleared", cleared)?,
        description: description.clone(),
    })
}

/// Parse an `xs:dateTime` as local wall-clock time.
///
/// An explicit offset is dropped rather than applied, so `08:05+01:00`
/// stays `08:05`.
pub fn parse_local_datetime(
    field: &'static str,
    s: &str,
) -> Result<NaiveDateTime, ConversionError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.naive_local()))
        .map_err(|_| ConversionError::InvalidValue {
            field,
            value: s.to_string(),
        })
}

fn parse_int(field: &'static str, value: &Scalar) -> Result<i64, ConversionError> {
    let invalid = |v: String| ConversionError::InvalidValue { field, value: v };
    match value {
        Scalar::Int(n) => Ok(*n),
        Scalar::Text(s) => s.trim().parse().map_err(|_| invalid(s.clone())),
        Scalar::Bool(b) => Err(invalid(b.to_string())),
    }
}

fn parse_bool(field: &'static str, value: &Scalar) -> Result<bool, ConversionError> {
    match value {
        Scalar::Bool(b) => Ok(*b),
        Scalar::Text(s) if matches!(s.trim(), "true" | "1") => Ok(true),
        Scalar::Text(s) if matches!(s.trim(), "false" | "0") => Ok(false),
        Scalar::Int(1) => Ok(true),
        Scalar::Int(0) => Ok(false),
        other => Err(ConversionError::InvalidValue {
            field,
            value: match other {
                Scalar::Text(s) => s.clone(),
                Scalar::Int(n) => n.to_string(),
                Scalar::Bool(b) => b.to_string(),
            },
        }),
    }
}
