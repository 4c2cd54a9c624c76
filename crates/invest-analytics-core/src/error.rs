use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvestError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Infeasible constraints: {0}")]
    InfeasibleConstraints(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for InvestError {
    fn from(e: serde_json::Error) -> Self {
        InvestError::SerializationError(e.to_string())
    }
}
