//! Unified error hierarchy for liftrs
//!
//! Expected branching (deloads, missing rules, malformed template entries)
//! never lands here; errors are reserved for unknown program keys, completed
//! programs, and storage failures.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::cycle::ProgressionError;
use crate::storage::StorageError;

/// Top-level error type for all liftrs operations
#[derive(Debug, Error)]
pub enum LiftrsError {
    /// Catalog lookup errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Week progression errors
    #[error("Progression error: {0}")]
    Progression(#[from] ProgressionError),

    /// Storage operation errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Template validation errors
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// Raw rusqlite errors always belong to the storage domain
impl From<rusqlite::Error> for LiftrsError {
    fn from(e: rusqlite::Error) -> Self {
        LiftrsError::Storage(StorageError::Sqlite(e))
    }
}

/// Result type alias for liftrs operations
pub type Result<T> = std::result::Result<T, LiftrsError>;

impl LiftrsError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LiftrsError::Storage(StorageError::Sqlite(_))
                | LiftrsError::Storage(StorageError::WeekConflict { .. })
                | LiftrsError::Io(_)
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftrsError::Catalog(_) => ErrorSeverity::Warning,
            LiftrsError::Progression(_) => ErrorSeverity::Warning,
            LiftrsError::Storage(StorageError::NotFound { .. }) => ErrorSeverity::Warning,
            LiftrsError::Storage(StorageError::WeekConflict { .. }) => ErrorSeverity::Warning,
            LiftrsError::Storage(_) => ErrorSeverity::Error,
            LiftrsError::Template(_) => ErrorSeverity::Warning,
            LiftrsError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftrsError::Catalog(CatalogError::UnknownProgram { key }) => {
                format!(
                    "Unknown program '{}'. Run `liftrs list` to see the catalog.",
                    key
                )
            }
            LiftrsError::Progression(ProgressionError::ProgramComplete { weeks, .. }) => {
                format!(
                    "This {}-week program has finished. Reset it to run it again.",
                    weeks
                )
            }
            LiftrsError::Storage(StorageError::WeekConflict { .. }) => {
                "The program week advanced concurrently. Check its status and retry.".to_string()
            }
            LiftrsError::Storage(StorageError::NotFound { entity, id }) => {
                format!("Could not find {}: {}", entity, id)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
