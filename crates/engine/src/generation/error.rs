use swatch_api::ApiError;
use thiserror::Error;

/// Message shown when the service response does not carry a usable palette.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response format from server";

/// Failures captured by the generation lifecycle.
///
/// The display text of each variant is the message surfaced to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The submission was rejected before any network activity.
    #[error("{0}")]
    Validation(String),
    /// The service answered, but not with a list of colors.
    #[error("{0}")]
    Protocol(String),
    /// The request failed in transit or with a non-2xx status.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },
}

impl GenerationError {
    pub fn invalid_response() -> Self {
        Self::Protocol(INVALID_RESPONSE_MESSAGE.to_string())
    }

    /// HTTP status code, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ApiError> for GenerationError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status, .. } => Self::Transport {
                status: Some(status),
                message: error.to_string(),
            },
            ApiError::Decode(_) => Self::invalid_response(),
            ApiError::Network(_) | ApiError::InvalidBaseUrl { .. } | ApiError::Client(_) => Self::Transport {
                status: None,
                message: error.to_string(),
            },
        }
    }
}
