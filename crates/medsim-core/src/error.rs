use thiserror::Error;

#[derive(Debug, Error)]
pub enum MedSimError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MedSimError {
    fn from(e: serde_json::Error) -> Self {
        MedSimError::SerializationError(e.to_string())
    }
}
