use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimaterixError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    /// A selected initiative name is missing from the catalog. This is a
    /// catalog/bundle configuration mismatch, not a user error: the whole
    /// computation aborts rather than silently skipping the entry.
    #[error("Unknown initiative '{name}' in {context}: not present in the catalog")]
    UnknownInitiative { name: String, context: String },

    #[error("Unknown scenario bundle '{0}'")]
    UnknownBundle(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid wizard transition: {0}")]
    InvalidTransition(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ClimaterixError {
    fn from(e: serde_json::Error) -> Self {
        ClimaterixError::SerializationError(e.to_string())
    }
}
