use reqwest::StatusCode;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Failure of a notes API call.
///
/// All three kinds are reported to the caller the same way; the variants only
/// exist so callers can tell them apart if they need to.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was obtained, or the body could not be read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `body` is the raw
    /// response text.
    #[error("{body}")]
    Status { status: StatusCode, body: String },

    /// A success response carried a body that is not the expected JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Descriptive message stored in the client status.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}
