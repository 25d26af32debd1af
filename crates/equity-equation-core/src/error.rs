use thiserror::Error;

#[derive(Debug, Error)]
pub enum EquityEquationError {
    #[error("Invalid input: {field} = {value} — {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl EquityEquationError {
    /// Name of the offending input field, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            EquityEquationError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EquityEquationError {
    fn from(e: serde_json::Error) -> Self {
        EquityEquationError::SerializationError(e.to_string())
    }
}
