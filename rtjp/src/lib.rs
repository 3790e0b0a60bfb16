//! Realtime journey planner client.
//!
//! Asks the National Rail journey planner for one day's outward and inward
//! trains, prints the fares and bulletins for the trains we care about, and
//! keeps the response on disk so the report can be produced again offline.

pub mod config;
pub mod domain;
pub mod error;
pub mod ojp;
pub mod report;
pub mod run;
pub mod sanitize;
pub mod store;

pub use error::Error;
