//! Top-level error type.

use crate::ojp::{ConversionError, OjpError};
use crate::store::StoreError;

/// Everything that can end a run. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network, auth, fault or metadata problem with the planner service
    #[error("service error: {0}")]
    Service(#[from] OjpError),

    /// The service answered, but not in the shape we rely on
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] ConversionError),

    /// Saved response missing or unreadable
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Report could not be written out
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}
