//! # Pool Configuration
//!
//! Sizing knobs for the list pools, loaded once at startup from TOML.
//!
//! ```toml
//! initial_capacity = 16
//! max_idle_per_type = 32
//! shrink_above = 1024
//! ```
//!
//! Missing keys fall back to [`PoolConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Sizing parameters shared by every typed pool in a registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Element capacity reserved for a freshly created list.
    pub initial_capacity: usize,
    /// Maximum idle lists kept per element type. `0` keeps every list.
    pub max_idle_per_type: usize,
    /// Lists whose capacity grew past this are shrunk back to
    /// `initial_capacity` on release. `0` never shrinks.
    pub shrink_above: usize,
}

impl PoolConfig {
    /// Default element capacity of a new list.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 8;
    /// Default idle cap per element type.
    pub const DEFAULT_MAX_IDLE_PER_TYPE: usize = 64;
    /// Default shrink threshold.
    pub const DEFAULT_SHRINK_ABOVE: usize = 4096;

    /// Sets the initial capacity of new lists.
    #[must_use]
    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the idle cap per element type.
    #[must_use]
    pub const fn with_max_idle_per_type(mut self, max_idle_per_type: usize) -> Self {
        self.max_idle_per_type = max_idle_per_type;
        self
    }

    /// Sets the shrink threshold.
    #[must_use]
    pub const fn with_shrink_above(mut self, shrink_above: usize) -> Self {
        self.shrink_above = shrink_above;
        self
    }

    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Parse`] if the text is not valid TOML or has unknown keys
    /// - [`ConfigError::Invalid`] if [`PoolConfig::validate`] rejects the values
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise the same
    /// errors as [`PoolConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that the values are consistent with each other.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `shrink_above` is set below
    /// `initial_capacity`.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.shrink_above != 0 && self.shrink_above < self.initial_capacity {
            return Err(ConfigError::Invalid(format!(
                "shrink_above ({}) is below initial_capacity ({})",
                self.shrink_above, self.initial_capacity
            )));
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            max_idle_per_type: Self::DEFAULT_MAX_IDLE_PER_TYPE,
            shrink_above: Self::DEFAULT_SHRINK_ABOVE,
        }
    }
}
