use scalatro_core::RunError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("setup error: {0}")]
    Setup(String),
    #[error("run error: {0}")]
    Run(#[from] RunError),
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
