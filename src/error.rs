#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Service unreachable: {0}")]
    Unreachable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Price suggestion count mismatch: sent {expected} items, received {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DashboardError {
    /// True for failures of the request itself (transport or non-2xx status),
    /// as opposed to failures decoding or validating what came back.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::Http(_) | DashboardError::Status { .. } | DashboardError::Unreachable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
