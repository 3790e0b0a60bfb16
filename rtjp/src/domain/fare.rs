//! Fares and fare classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fare tier requested from, and reported by, the journey planner.
///
/// Codes other than `STANDARD` and `FIRST` are kept verbatim so that a
/// response never fails to load just because the service grew a new tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FareClass {
    Standard,
    First,
    Other(UnknownFareClass),
}

/// A fare class code that is neither `STANDARD` nor `FIRST`.
///
/// Only built by parsing a code, so a [`FareClass`] has exactly one
/// representation for each code and survives a save/load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownFareClass(String);

impl UnknownFareClass {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FareClass {
    /// The wire code, e.g. `STANDARD`.
    pub fn as_str(&self) -> &str {
        match self {
            FareClass::Standard => "STANDARD",
            FareClass::First => "FIRST",
            FareClass::Other(code) => code.as_str(),
        }
    }
}

impl From<String> for FareClass {
    fn from(code: String) -> Self {
        match code.as_str() {
            "STANDARD" => FareClass::Standard,
            "FIRST" => FareClass::First,
            _ => FareClass::Other(UnknownFareClass(code)),
        }
    }
}

impl From<FareClass> for String {
    fn from(class: FareClass) -> Self {
        class.as_str().to_string()
    }
}

impl FromStr for FareClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FareClass::from(s.to_string()))
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An amount of money in pence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pence(pub i64);

impl fmt::Display for Pence {
    /// Renders as pounds with exactly two decimal places, e.g. `£12.05`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}£{}.{:02}", abs / 100, abs % 100)
    }
}

/// One priced option on a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub total_price: Pence,
    pub fare_class: FareClass,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_variants() {
        assert_eq!("STANDARD".parse::<FareClass>().unwrap(), FareClass::Standard);
        assert_eq!("FIRST".parse::<FareClass>().unwrap(), FareClass::First);
        match "SLEEPER".parse::<FareClass>().unwrap() {
            FareClass::Other(code) => assert_eq!(code.as_str(), "SLEEPER"),
            other => panic!("expected an unknown class, got {other:?}"),
        }
    }

    #[test]
    fn fare_class_serializes_as_code() {
        let json = serde_json::to_string(&FareClass::Standard).unwrap();
        assert_eq!(json, "\"STANDARD\"");
        let other: FareClass = serde_json::from_str("\"SLEEPER\"").unwrap();
        assert_eq!(other.to_string(), "SLEEPER");
    }

    #[test]
    fn every_code_round_trips_to_an_equal_class() {
        for code in ["STANDARD", "FIRST", "SLEEPER", "standard", ""] {
            let class: FareClass = code.parse().unwrap();
            let json = serde_json::to_string(&class).unwrap();
            let back: FareClass = serde_json::from_str(&json).unwrap();
            assert_eq!(back, class);
            assert_eq!(back.as_str(), code);
        }
    }

    #[test]
    fn pence_display() {
        assert_eq!(Pence(0).to_string(), "£0.00");
        assert_eq!(Pence(5).to_string(), "£0.05");
        assert_eq!(Pence(1250).to_string(), "£12.50");
        assert_eq!(Pence(10_099).to_string(), "£100.99");
        assert_eq!(Pence(-150).to_string(), "-£1.50");
    }

    #[test]
    fn fare_uses_service_field_names() {
        let fare = Fare {
            total_price: Pence(1234),
            fare_class: FareClass::Standard,
            description: "Anytime Day Single".into(),
        };
        let json = serde_json::to_value(&fare).unwrap();
        assert_eq!(json["totalPrice"], 1234);
        assert_eq!(json["fareClass"], "STANDARD");
        assert_eq!(json["description"], "Anytime Day Single");
    }
}
