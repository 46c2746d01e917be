use reqwest::StatusCode;
use thiserror::Error;

use engine::EngineError;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A fetch or mutation was attempted while nobody is signed in.
    ///
    /// This is a caller bug, never worth retrying.
    #[error("not signed in")]
    MissingIdentity,
    /// The server answered with a non-success status.
    ///
    /// `message` is the server's own `error` text, shown as-is.
    #[error("{message}")]
    Remote { status: StatusCode, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid base_url: {0}")]
    BaseUrl(String),
    /// A draft failed validation, or server data could not be converted.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ClientError {
    /// HTTP status if the server rejected the call.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
