pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod params;
pub mod projector;
pub mod selector;
pub mod sensitivity;
pub mod types;

#[cfg(feature = "scenario")]
pub mod scenario;

#[cfg(feature = "lca")]
pub mod lca;

#[cfg(feature = "reporting")]
pub mod reporting;

pub use error::ClimaterixError;
pub use types::*;

/// Standard result type for all emissions-model operations
pub type ClimaterixResult<T> = Result<T, ClimaterixError>;
