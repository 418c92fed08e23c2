//! Core types and error handling for downgrade-build

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{DowngradeError, Result};
pub use types::DependencyMap;
