use thiserror::Error;

/// Why an upstream lookup produced no usable payload.
///
/// Gateways never surface this; they log it and fall back.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode response payload from {0}")]
    Decode(String, #[source] reqwest::Error),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Maps a failed `error_for_status` into the status variant when a status is known.
    pub(crate) fn from_status(url: &str, e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => SourceError::HttpStatus {
                url: url.to_string(),
                status,
                source: e,
            },
            None => SourceError::NetworkRequest(url.to_string(), e),
        }
    }
}
