//! Journey planner client errors.

/// Failures talking to the journey planner service.
///
/// None of these are retried; the caller decides what to do.
#[derive(Debug, thiserror::Error)]
pub enum OjpError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials rejected
    #[error("unauthorized: check RTJP_USERNAME and RTJP_PASSWORD")]
    Unauthorized,

    /// Non-success status without a SOAP fault in the body
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The service rejected the request (validation failure, etc.)
    #[error("SOAP fault {code}: {message}")]
    Fault { code: String, message: String },

    /// WSDL missing the endpoint or operation we need
    #[error("malformed service metadata: {0}")]
    Metadata(String),

    /// Response body was not well-formed XML
    #[error("XML parse error: {message}{}", body_suffix(.body))]
    Xml {
        message: String,
        body: Option<String>,
    },

    /// Request could not be constructed
    #[error("invalid request: {0}")]
    Request(String),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
