//! Journey planner SOAP client.
//!
//! One `RealtimeJourneyPlan` call per query. The endpoint and SOAPAction come
//! from the WSDL (cached on disk); authentication is HTTP Basic.

use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::domain::{JourneyRequest, JourneyResponse};
use crate::error::Error;

use super::JourneyPlanner;
use super::envelope::build_request;
use super::error::OjpError;
use super::response::{fault_in, journey_response_from_xml};
use super::wsdl::{MetadataCache, MetadataCacheConfig, ServiceMetadata, parse_wsdl};

/// Default WSDL location for the realtime journey planner.
pub const DEFAULT_WSDL_URL: &str = "https://ojp.nationalrail.co.uk/webservices/jpdlr.wsdl";

/// Configuration for the journey planner client.
#[derive(Debug, Clone)]
pub struct OjpConfig {
    pub username: String,
    pub password: String,
    /// WSDL location (defaults to production)
    pub wsdl_url: String,
    /// Where WSDL-derived metadata is cached
    pub cache: MetadataCacheConfig,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OjpConfig {
    /// Create a config with the given credentials and production defaults.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            wsdl_url: DEFAULT_WSDL_URL.to_string(),
            cache: MetadataCacheConfig::default(),
            timeout_secs: 30,
        }
    }

    /// Set a custom WSDL URL (for testing).
    pub fn with_wsdl_url(mut self, url: impl Into<String>) -> Self {
        self.wsdl_url = url.into();
        self
    }

    /// Take credentials from `RTJP_USERNAME` / `RTJP_PASSWORD`.
    ///
    /// Only the live client needs them, so only that path reads them.
    pub fn with_credentials_from_env(mut self) -> Self {
        self.username = std::env::var("RTJP_USERNAME").unwrap_or_else(|_| {
            warn!("RTJP_USERNAME not set. API calls will fail.");
            String::new()
        });
        self.password = std::env::var("RTJP_PASSWORD").unwrap_or_else(|_| {
            warn!("RTJP_PASSWORD not set. API calls will fail.");
            String::new()
        });
        self
    }

    pub fn with_cache(mut self, cache: MetadataCacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Map a failed HTTP exchange to an error.
///
/// A SOAP fault in the body wins over the bare status, since it says why
/// the request was rejected.
fn error_for_status(status: StatusCode, body: String) -> OjpError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return OjpError::Unauthorized;
    }
    fault_in(&body).unwrap_or(OjpError::Api {
        status: status.as_u16(),
        message: body,
    })
}

/// Realtime journey planner client.
#[derive(Debug, Clone)]
pub struct OjpClient {
    http: reqwest::Client,
    username: String,
    password: String,
    wsdl_url: String,
    cache: MetadataCache,
}

impl OjpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OjpConfig) -> Result<Self, OjpError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            username: config.username,
            password: config.password,
            wsdl_url: config.wsdl_url,
            cache: MetadataCache::new(config.cache),
        })
    }

    /// Attach HTTP Basic credentials; both the WSDL and the service need them.
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }

    /// Endpoint and SOAPAction, from the disk cache or a fresh WSDL fetch.
    pub async fn metadata(&self) -> Result<ServiceMetadata, OjpError> {
        if let Some(metadata) = self.cache.load(&self.wsdl_url) {
            debug!(path = %self.cache.path().display(), "service metadata cache hit");
            return Ok(metadata);
        }

        debug!(url = %self.wsdl_url, "fetching WSDL");
        let response = self.authed(self.http.get(&self.wsdl_url)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, body));
        }

        let metadata = parse_wsdl(&response.text().await?)?;

        if let Err(e) = self.cache.save(&self.wsdl_url, &metadata) {
            warn!(path = %self.cache.path().display(), error = %e, "could not cache service metadata");
        }

        Ok(metadata)
    }

    /// Send the request envelope and return the raw response body.
    async fn call(&self, envelope: String) -> Result<String, OjpError> {
        let metadata = self.metadata().await?;

        let response = self
            .authed(self.http.post(&metadata.endpoint))
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{}\"", metadata.soap_action))
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "journey plan response");

        let body = response.text().await?;
        if !status.is_success() {
            return Err(error_for_status(status, body));
        }

        Ok(body)
    }

    /// Plan a journey and return the normalized response.
    pub async fn plan_journey(&self, request: &JourneyRequest) -> Result<JourneyResponse, Error> {
        let envelope = build_request(request)?;
        debug!(message = %envelope, "message to be sent");

        let body = self.call(envelope).await?;
        journey_response_from_xml(&body)
    }
}

impl JourneyPlanner for OjpClient {
    async fn plan(&self, request: &JourneyRequest) -> Result<JourneyResponse, Error> {
        self.plan_journey(request).await
    }
}
