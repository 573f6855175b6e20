use serde_json::error::Category;

/// Why a forecast fetch failed.
///
/// The view collapses every variant into the same `ViewState::Error`; the
/// distinction only shows up in logs.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to backend failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend payload is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("backend payload has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("backend returned no forecast samples")]
    Empty,

    #[error("forecast task ended before producing a result")]
    Aborted,
}

impl FetchError {
    /// Split JSON failures into syntax problems and shape mismatches.
    pub fn from_json(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => FetchError::Shape(err),
            Category::Syntax | Category::Eof | Category::Io => FetchError::Malformed(err),
        }
    }

    /// Short machine-friendly label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Status { .. } => "status",
            FetchError::Malformed(_) => "malformed",
            FetchError::Shape(_) => "shape",
            FetchError::Empty => "empty",
            FetchError::Aborted => "aborted",
        }
    }
}
