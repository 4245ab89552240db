//! core
//!
//! Core domain types and configuration for commitbridge.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, RefName, ObjectKind
//! - [`person`] - Author/committer value type
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at construction time
//! - Values crossing the libgit2 boundary are owned copies

pub mod config;
pub mod person;
pub mod types;
