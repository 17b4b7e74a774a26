use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("Unknown team: {0}")]
    UnknownTeam(String),
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CoreError::DeserializationError(err.to_string())
        } else {
            CoreError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
