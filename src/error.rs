use thiserror::Error;

/// Failures while loading the explorer's resources
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// `status` is 0 when the request was rejected before any response
    #[error("request to {url} failed: {status}")]
    Fetch { url: String, status: u16 },

    #[error("could not parse {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("could not load image: {url}")]
    ImageDecode { url: String },
}
