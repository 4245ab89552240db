//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$CBR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/commitbridge/config.toml`
//! 3. `~/.commitbridge/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/commitbridge/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing so that a bad identity or
//! an unusable abbreviation length is reported at load time.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [identity]
/// name = "Ada Lovelace"
/// email = "ada@example.com"
///
/// [output]
/// json = false
/// short_id_len = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Identity used for newly created commits
    pub identity: Option<IdentityConfig>,

    /// Output defaults
    pub output: Option<OutputConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(identity) = &self.identity {
            identity.validate()?;
        }
        if let Some(output) = &self.output {
            output.validate()?;
        }
        Ok(())
    }
}

/// Repository configuration (repo scope). Overrides [`GlobalConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Identity override for this repository
    pub identity: Option<IdentityConfig>,

    /// Output overrides for this repository
    pub output: Option<OutputConfig>,
}

impl RepoConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(identity) = &self.identity {
            identity.validate()?;
        }
        if let Some(output) = &self.output {
            output.validate()?;
        }
        Ok(())
    }
}

/// Author/committer identity for commits created by `cbr new`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl IdentityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "identity.name cannot be empty".into(),
                ));
            }
        }
        if let Some(email) = &self.email {
            if email.contains(['<', '>']) || email.trim().is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid identity.email '{}'",
                    email
                )));
            }
        }
        Ok(())
    }
}

/// Output formatting defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Emit JSON instead of text
    pub json: Option<bool>,

    /// Length of abbreviated object ids in text output
    pub short_id_len: Option<usize>,
}

impl OutputConfig {
    /// Shortest abbreviation git itself will print.
    pub const MIN_SHORT_ID_LEN: usize = 4;

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(len) = self.short_id_len {
            if !(Self::MIN_SHORT_ID_LEN..=64).contains(&len) {
                return Err(ConfigError::InvalidValue(format!(
                    "output.short_id_len must be between {} and 64, got {}",
                    Self::MIN_SHORT_ID_LEN,
                    len
                )));
            }
        }
        Ok(())
    }
}
