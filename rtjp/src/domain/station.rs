//! Station codes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string is not a valid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code {input:?}: {reason}")]
pub struct InvalidCrs {
    input: String,
    reason: &'static str,
}

/// A 3-letter CRS station code, e.g. `ABD` for Aberdeen.
///
/// The journey planner only accepts uppercase codes, so a `Crs` always
/// holds exactly three ASCII letters A-Z.
///
/// # Examples
///
/// ```
/// use rtjp::domain::Crs;
///
/// let abd = Crs::parse("ABD").unwrap();
/// assert_eq!(abd.as_str(), "ABD");
///
/// assert!(Crs::parse("abd").is_err());
/// assert!(Crs::parse("AB").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a CRS code, rejecting anything but three uppercase letters.
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let invalid = |reason| InvalidCrs {
            input: s.to_string(),
            reason,
        };

        let bytes: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| invalid("must be exactly 3 characters"))?;

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(invalid("must be uppercase ASCII letters A-Z"));
        }

        Ok(Crs(bytes))
    }

    /// Build a code known at compile time; invalid input fails the build
    /// when used in a `const`.
    pub const fn from_static(code: &[u8; 3]) -> Self {
        let mut i = 0;
        while i < 3 {
            assert!(code[i].is_ascii_uppercase(), "CRS codes are uppercase A-Z");
            i += 1;
        }
        Crs(*code)
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase bytes are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Crs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Crs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Crs::parse(&s).map_err(serde::de::Error::custom)
    }
}
