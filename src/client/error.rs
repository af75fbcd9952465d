// ABOUTME: Transport error type for deployment client calls, SNAFU style.
// ABOUTME: Carries the request URL and exposes a kind for programmatic handling.

use snafu::Snafu;

/// Any failure talking to the remote management endpoint.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientError {
    #[snafu(display("failed to build HTTP client: {source}"))]
    Build { source: reqwest::Error },

    #[snafu(display("management certificate rejected: {source}"))]
    Identity { source: reqwest::Error },

    #[snafu(display("invalid management endpoint '{endpoint}': {message}"))]
    Endpoint { endpoint: String, message: String },

    #[snafu(display("request to {url} failed: {source}"))]
    Request { url: String, source: reqwest::Error },

    #[snafu(display("{url} returned HTTP {status}: {code}: {message}"))]
    Status {
        url: String,
        status: u16,
        code: String,
        message: String,
    },

    #[snafu(display("failed to decode response from {url}: {source}"))]
    Decode {
        url: String,
        source: quick_xml::DeError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// Client could not be set up (endpoint, certificate, TLS).
    Configuration,
    /// Endpoint unreachable or the connection failed mid-request.
    Connection,
    /// The service, deployment or instance does not exist remotely.
    NotFound,
    /// The remote rejected the request.
    Rejected,
    /// The response body could not be understood.
    Decode,
}

impl ClientError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            ClientError::Build { .. }
            | ClientError::Identity { .. }
            | ClientError::Endpoint { .. } => ClientErrorKind::Configuration,
            ClientError::Request { .. } => ClientErrorKind::Connection,
            ClientError::Status { status: 404, .. } => ClientErrorKind::NotFound,
            ClientError::Status { .. } => ClientErrorKind::Rejected,
            ClientError::Decode { .. } => ClientErrorKind::Decode,
        }
    }
}
