//! Saved responses, one file per travel date.
//!
//! A query's normalized response is written to `response_<YYYY-MM-DD>.json`
//! so the report can be re-run later without calling the service again.
//! Timestamps are stored as naive local times, exactly as reported.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::JourneyResponse;

/// Errors from reading or writing saved responses.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Nothing saved for this date
    #[error("no saved response for {date} (looked for {path:?})")]
    NotFound { date: NaiveDate, path: PathBuf },

    /// Filesystem failure
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File exists but is not a saved response
    #[error("failed to decode {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Date-keyed response files in one directory.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    dir: PathBuf,
}

impl ResponseStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the response for `date`.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("response_{}.json", date.format("%Y-%m-%d")))
    }

    /// Write `response` for `date`, replacing anything saved before.
    pub fn save(&self, date: NaiveDate, response: &JourneyResponse) -> Result<PathBuf, StoreError> {
        let path = self.path_for(date);

        if !self.dir.as_os_str().is_empty() {
            std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
        }

        let json = serde_json::to_vec(response).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;

        std::fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "saved response");
        Ok(path)
    }

    /// Read back the response saved for `date`.
    pub fn load(&self, date: NaiveDate) -> Result<JourneyResponse, StoreError> {
        let path = self.path_for(date);

        let bytes = std::fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                date,
                path: path.clone(),
            },
            _ => StoreError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let response: JourneyResponse =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;

        debug!(
            path = %path.display(),
            outward = response.outward_journey.len(),
            inward = response.inward_journey.len(),
            "loaded response from file"
        );
        Ok(response)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
