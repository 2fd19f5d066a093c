//! Error types for chart rendering and its collaborators

use thiserror::Error;

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors that can occur while preparing or rendering a chart
#[derive(Error, Debug)]
pub enum ChartError {
    /// The value domain has zero (or non-finite) width, so linear scaling is undefined.
    #[error("Degenerate value range: min {min} equals max {max}")]
    DegenerateRange { min: f64, max: f64 },

    #[error("Drawing surface failure: {message}")]
    Surface { message: String },

    #[error("Bar retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Image processing error: {message}")]
    Image { message: String },
}

/// Failures raised by the network and data retrieval collaborators.
///
/// These are always reported before the renderer runs.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Network not connected within timeout")]
    NotConnected,

    #[error("HTTP request failed: {message}")]
    Http { message: String },

    #[error("Unexpected HTTP status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Could not read saved aggregates from {path}: {message}")]
    Read { path: String, message: String },

    #[error("Could not decode aggregates response: {message}")]
    Decode { message: String },

    #[error("Incomplete bar sequence: expected {expected}, received {received}")]
    Incomplete { expected: usize, received: usize },

    #[error("No bars returned for the requested window")]
    Empty,
}

impl From<config::ConfigError> for ChartError {
    fn from(err: config::ConfigError) -> Self {
        ChartError::Config {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        RetrievalError::Decode {
            message: err.to_string(),
        }
    }
}

/// The URL is dropped from the message so query parameters never reach logs.
#[cfg(feature = "fetch")]
impl From<reqwest::Error> for RetrievalError {
    fn from(err: reqwest::Error) -> Self {
        RetrievalError::Http {
            message: err.without_url().to_string(),
        }
    }
}

#[cfg(feature = "png-export")]
impl From<image::ImageError> for ChartError {
    fn from(err: image::ImageError) -> Self {
        ChartError::Image {
            message: err.to_string(),
        }
    }
}
