// Library interface for the liftrs modules
// This allows integration tests to access the core functionality

pub mod catalog;
pub mod config;
pub mod cycle;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod progression;
pub mod recovery;
pub mod repmax;
pub mod storage;

// Re-export commonly used types for convenience
pub use models::*;
pub use catalog::{CatalogError, ProgramDefinition, PROGRAMS};
pub use cycle::ProgressionError;
pub use error::{LiftrsError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use progression::ProgressionCalculator;
pub use repmax::MaxCalculator;
pub use storage::Store;
