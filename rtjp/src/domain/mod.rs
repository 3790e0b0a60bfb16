//! Domain types for the journey-plan client.
//!
//! These are the validated, library-independent shapes the report and the
//! store work with. Nothing here knows about SOAP or XML.

mod fare;
mod journey;
mod request;
mod station;

pub use fare::{Fare, FareClass, Pence, UnknownFareClass};
pub use journey::{Bulletin, Journey, JourneyResponse, ScheduledTimes, Timetable};
pub use request::{JourneyRequest, Passengers};
pub use station::{Crs, InvalidCrs};
