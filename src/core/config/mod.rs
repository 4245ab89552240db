//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! commitbridge has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$CBR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/commitbridge/config.toml`
//! 3. `~/.commitbridge/config.toml`
//!
//! # Repo Config Location
//!
//! `<git-dir>/commitbridge/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use commitbridge::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! let config = result.config;
//!
//! println!("JSON output: {}", config.json());
//! println!("Short ids: {}", config.short_id_len());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, IdentityConfig, OutputConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules automatically. Repo config
/// overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Default length of abbreviated object ids.
    pub const DEFAULT_SHORT_ID_LEN: usize = 7;

    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads repo-specific config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(git_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global(&mut warnings)?;

        let (repo, repo_path) = match git_dir {
            Some(dir) => Self::load_repo(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    fn load_global(
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. $CBR_CONFIG
        if let Ok(path) = std::env::var("CBR_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
            warnings.push(ConfigWarning {
                message: "CBR_CONFIG points to a missing file, ignoring it".to_string(),
                path,
            });
        }

        // 2. $XDG_CONFIG_HOME/commitbridge/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("commitbridge/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. ~/.commitbridge/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".commitbridge/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    fn load_repo(git_dir: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(git_dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_toml(&path)?;
        Ok((Some(config), Some(path)))
    }

    fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path for repo config inside a git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("commitbridge/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn identity(&self) -> impl Iterator<Item = &IdentityConfig> {
        self.repo
            .as_ref()
            .and_then(|r| r.identity.as_ref())
            .into_iter()
            .chain(self.global.identity.as_ref())
    }

    fn output(&self) -> impl Iterator<Item = &OutputConfig> {
        self.repo
            .as_ref()
            .and_then(|r| r.output.as_ref())
            .into_iter()
            .chain(self.global.output.as_ref())
    }

    /// Configured identity name, if any.
    pub fn identity_name(&self) -> Option<&str> {
        self.identity().find_map(|i| i.name.as_deref())
    }

    /// Configured identity email, if any.
    pub fn identity_email(&self) -> Option<&str> {
        self.identity().find_map(|i| i.email.as_deref())
    }

    /// Whether output defaults to JSON.
    ///
    /// Defaults to `false` if not configured.
    pub fn json(&self) -> bool {
        self.output().find_map(|o| o.json).unwrap_or(false)
    }

    /// Abbreviated object id length for text output.
    pub fn short_id_len(&self) -> usize {
        self.output()
            .find_map(|o| o.short_id_len)
            .unwrap_or(Self::DEFAULT_SHORT_ID_LEN)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
