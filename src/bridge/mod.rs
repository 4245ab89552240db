//! bridge
//!
//! Value bridge between dynamically typed callers and bridged commits.
//!
//! # Modules
//!
//! - [`value`] - The [`Value`] enum and type-checked extraction
//! - [`methods`] - The static commit method table and [`dispatch`]
//!
//! Typed Rust callers use [`crate::object::Commit`] directly. The bridge
//! exists for callers that only have untyped input, such as the CLI's
//! `get`/`set` commands, and reports shape problems as
//! [`BridgeError::TypeMismatch`] before anything reaches the commit.

mod error;
pub mod methods;
pub mod value;

pub use error::BridgeError;
pub use methods::{dispatch, lookup_method, Access, MethodDef, METHODS};
pub use value::Value;
