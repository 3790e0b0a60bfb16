//! Service metadata from the WSDL, with a disk cache.
//!
//! The WSDL only changes when the service is redeployed, so the two facts
//! we need from it (endpoint and SOAPAction) are cached for weeks.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};

use super::error::OjpError;

/// Operation whose SOAPAction we need.
pub const OPERATION: &str = "RealtimeJourneyPlan";

/// Default cache freshness: 31 days.
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 31);

/// Where and how to call the journey-plan operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    pub endpoint: String,
    pub soap_action: String,
}

fn attribute(start: &BytesStart<'_>, local: &[u8]) -> Result<Option<String>, OjpError> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| OjpError::Metadata(e.to_string()))?;
        if attr.key.local_name().as_ref() == local {
            let value = attr
                .unescape_value()
                .map_err(|e| OjpError::Metadata(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Extract endpoint and SOAPAction for [`OPERATION`] from a WSDL document.
pub fn parse_wsdl(wsdl: &str) -> Result<ServiceMetadata, OjpError> {
    let mut reader = Reader::from_str(wsdl);
    reader.config_mut().trim_text(true);

    let mut endpoint = None;
    let mut soap_action = None;
    let mut in_operation = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| OjpError::Metadata(format!("unreadable WSDL: {e}")))?;

        match event {
            Event::Start(ref start) | Event::Empty(ref start) => {
                match start.local_name().as_ref() {
                    b"address" if endpoint.is_none() => endpoint = attribute(start, b"location")?,
                    b"operation" if in_operation => {
                        if soap_action.is_none() {
                            soap_action = attribute(start, b"soapAction")?;
                        }
                    }
                    b"operation" => {
                        in_operation = matches!(event, Event::Start(_))
                            && attribute(start, b"name")?.as_deref() == Some(OPERATION);
                    }
                    _ => {}
                }
            }
            Event::End(ref end) if end.local_name().as_ref() == b"operation" => {
                in_operation = false;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let endpoint =
        endpoint.ok_or_else(|| OjpError::Metadata("no soap:address location".to_string()))?;
    let soap_action = soap_action
        .ok_or_else(|| OjpError::Metadata(format!("no SOAPAction for {OPERATION}")))?;

    Ok(ServiceMetadata {
        endpoint,
        soap_action,
    })
}

/// Cached metadata with the time it was written.
#[derive(Debug, Serialize, Deserialize)]
struct CachedMetadata {
    cached_at_secs: u64,
    wsdl_url: String,
    metadata: ServiceMetadata,
}

/// Configuration for the metadata disk cache.
#[derive(Debug, Clone)]
pub struct MetadataCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl MetadataCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for MetadataCacheConfig {
    fn default() -> Self {
        Self::new("rtjp_wsdl_cache.json")
    }
}

fn now_secs() -> Option<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

/// Disk cache for [`ServiceMetadata`], keyed by WSDL URL.
#[derive(Debug, Clone)]
pub struct MetadataCache {
    config: MetadataCacheConfig,
}

impl MetadataCache {
    pub fn new(config: MetadataCacheConfig) -> Self {
        Self { config }
    }

    /// Cached metadata for `wsdl_url`, if present and fresh.
    ///
    /// Unreadable, stale, or foreign-URL entries all count as a miss.
    pub fn load(&self, wsdl_url: &str) -> Option<ServiceMetadata> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedMetadata = serde_json::from_str(&contents).ok()?;

        if cached.wsdl_url != wsdl_url {
            return None;
        }

        let age_secs = now_secs()?.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(cached.metadata)
    }

    /// Write metadata to the cache, creating parent directories as needed.
    pub fn save(&self, wsdl_url: &str, metadata: &ServiceMetadata) -> std::io::Result<()> {
        let cached = CachedMetadata {
            cached_at_secs: now_secs().unwrap_or(0),
            wsdl_url: wsdl_url.to_string(),
            metadata: metadata.clone(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&self.config.path, json)
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
