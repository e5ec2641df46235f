use thiserror::Error;

/// Errors produced by the porter protocol layer.
#[derive(Debug, Error)]
pub enum PorterError {
    #[error("config error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("timeout")]
    Timeout,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type PorterResult<T> = Result<T, PorterError>;
