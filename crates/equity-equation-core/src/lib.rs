pub mod error;
pub mod types;

#[cfg(feature = "decision")]
pub mod decision;

#[cfg(feature = "report")]
pub mod report;

pub use error::EquityEquationError;
pub use types::*;

/// Standard result type for all equity-equation operations
pub type EquityEquationResult<T> = Result<T, EquityEquationError>;
