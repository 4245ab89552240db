//! bridge::error
//!
//! Errors raised at the boundary between dynamic values and commit objects.

use thiserror::Error;

use crate::git::GitError;

/// Errors from bridged object operations.
///
/// Every failure is reported synchronously to the caller. Absent optional
/// fields are never errors; they come back as `None` / [`Value::Nil`].
///
/// [`Value::Nil`]: super::Value::Nil
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Argument is not of the expected shape or kind.
    #[error("wrong argument type {found} (expected {expected})")]
    TypeMismatch { expected: String, found: String },

    /// Operation needs an underlying object that is missing or of the
    /// wrong variant.
    #[error("not initialized: {0}")]
    NotInitialized(String),

    /// No method with this name in the commit method table.
    #[error("undefined method '{name}' for Commit")]
    NoMethod { name: String },

    /// Method called with the wrong number of arguments.
    #[error("wrong number of arguments for '{name}' (given {given}, expected {expected})")]
    Arity {
        name: String,
        expected: String,
        given: usize,
    },

    /// Failure reported by the native object model.
    #[error(transparent)]
    Git(#[from] GitError),
}

impl BridgeError {
    pub(crate) fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        BridgeError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// True for [`BridgeError::TypeMismatch`].
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, BridgeError::TypeMismatch { .. })
    }
}
