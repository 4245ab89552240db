//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing, debug logging and formatting
//!
//! # Design
//!
//! All command output goes through this module so quiet and debug modes
//! behave the same everywhere. Diagnostics go to stderr; results go to
//! stdout.

pub mod output;
