pub mod error;
pub mod loan;
pub mod simulation;
pub mod types;

pub use error::MedSimError;
pub use types::*;

/// Standard result type for fallible medsim operations
pub type MedSimResult<T> = Result<T, MedSimError>;
