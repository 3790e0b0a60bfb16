//! Mock journey planner for working without service credentials.
//!
//! Serves canned SOAP responses from a directory, one file per travel date,
//! and runs them through the same parsing pipeline as the live client.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{JourneyRequest, JourneyResponse};
use crate::error::Error;

use super::JourneyPlanner;
use super::envelope::build_request;
use super::error::OjpError;
use super::response::journey_response_from_xml;

/// Journey planner that answers from `{YYYY-MM-DD}.xml` files.
#[derive(Debug, Clone)]
pub struct MockOjpClient {
    responses: HashMap<NaiveDate, String>,
}

impl MockOjpClient {
    /// Load every `{date}.xml` file in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, OjpError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| OjpError::Api {
            status: 0,
            message: format!("Failed to read mock data directory {data_dir:?}: {e}"),
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| OjpError::Api {
                    status: 0,
                    message: format!("Failed to read directory entry: {e}"),
                })?
                .path();

            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("xml") {
                continue;
            }

            let Some(date) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            else {
                continue;
            };

            let xml = std::fs::read_to_string(&path).map_err(|e| OjpError::Api {
                status: 0,
                message: format!("Failed to read {path:?}: {e}"),
            })?;

            responses.insert(date, xml);
        }

        if responses.is_empty() {
            return Err(OjpError::Api {
                status: 0,
                message: format!("No mock response files found in {data_dir:?}"),
            });
        }

        Ok(Self { responses })
    }

    /// Dates with a canned response, earliest first.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<_> = self.responses.keys().copied().collect();
        dates.sort();
        dates
    }
}

impl JourneyPlanner for MockOjpClient {
    async fn plan(&self, request: &JourneyRequest) -> Result<JourneyResponse, Error> {
        // Build the envelope anyway so a bad request fails the same way.
        let envelope = build_request(request)?;
        debug!(message = %envelope, "message to be sent (mock)");

        let xml = self.responses.get(&request.date()).ok_or_else(|| OjpError::Api {
            status: 404,
            message: format!(
                "No mock response for {}. Available: {:?}",
                request.date(),
                self.available_dates()
            ),
        })?;

        journey_response_from_xml(xml)
    }
}
