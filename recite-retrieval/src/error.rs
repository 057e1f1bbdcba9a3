//! Error types for recite-retrieval
//!
//! Only `InvalidIdentity` ends a pass early. Transport and persistence
//! failures are logged at the step that hit them and the pass continues
//! without that step's contribution.

use thiserror::Error;

/// Retrieval engine error
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// External record source unreachable or returned an error
    #[error("Transport error from {source_name}: {message}")]
    Transport {
        source_name: &'static str,
        message: String,
    },

    /// Record source response could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// Store collaborator failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] recite_common::Error),

    /// Identity cannot be searched (e.g. no primary last name)
    #[error("Invalid identity {uid}: {reason}")]
    InvalidIdentity { uid: String, reason: String },

    /// Batch wait was interrupted before all identities finished
    #[error("Batch interrupted")]
    BatchInterrupted,
}

impl RetrievalError {
    pub fn transport(source_name: &'static str, message: impl Into<String>) -> Self {
        RetrievalError::Transport {
            source_name,
            message: message.into(),
        }
    }
}

/// Result type for retrieval operations
pub type Result<T> = std::result::Result<T, RetrievalError>;
