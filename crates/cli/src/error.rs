use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Client(#[from] client::ClientError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no username configured (use --username or FINTRACK_USERNAME)")]
    MissingUsername,
    #[error("wrong username or password for {0}")]
    BadCredentials(String),
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("could not load data: {0}")]
    Load(String),
    #[error("{0} not found")]
    NotFound(String),
}
