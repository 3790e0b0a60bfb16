//! Realtime journey planner (OJP) client.
//!
//! Talks SOAP to the National Rail journey planner and turns its responses
//! into a [`JourneyResponse`]:
//!
//! - the request envelope is built from a [`JourneyRequest`]
//! - the response XML is read into a plain tree, protocol markup stripped
//! - the tree is mapped explicitly onto the domain record
//!
//! The endpoint and SOAPAction are read from the service WSDL and cached on
//! disk for a month.

mod client;
mod convert;
mod envelope;
mod error;
mod mock;
mod response;
mod types;
mod wsdl;
pub mod xml;

use crate::domain::{JourneyRequest, JourneyResponse};
use crate::error::Error;

pub use client::{DEFAULT_WSDL_URL, OjpClient, OjpConfig};
pub use convert::ConversionError;
pub use envelope::build_request;
pub use error::OjpError;
pub use mock::MockOjpClient;
pub use response::{PROTOCOL_ARTIFACT_KEYS, journey_response_from_xml};
pub use wsdl::{MetadataCache, MetadataCacheConfig, ServiceMetadata, parse_wsdl};

/// Something that can answer a journey-plan query.
///
/// One call per query, no retries: an error is returned as-is.
#[allow(async_fn_in_trait)]
pub trait JourneyPlanner {
    async fn plan(&self, request: &JourneyRequest) -> Result<JourneyResponse, Error>;
}
