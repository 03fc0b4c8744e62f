//! Oracle configuration
//!
//! Settings can be built in code with [`OracleBuilder`] or loaded from TOML:
//!
//! ```toml
//! initial_row_capacity = 65536
//! double_delete = "error"
//! validate_coordinates = true
//! ```

use crate::core::error::{OracleError, Result};
use crate::core::oracle::OracleCore;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted `initial_row_capacity`; the bitmap still grows past it on demand
pub const MAX_ROW_CAPACITY: usize = 1 << 26;

/// What `delete_row` does with a row that was already deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleDeletePolicy {
    /// Log a warning and return `Ok(())`
    #[default]
    Ignore,
    /// Return [`OracleError::DoubleDelete`]
    Error,
}

/// Tunables for one [`OracleCore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Rows the liveness bitmap can hold before it first grows
    pub initial_row_capacity: usize,

    /// Behaviour on deleting an already-deleted row
    pub double_delete: DoubleDeletePolicy,

    /// Reject latitude/longitude outside [-90, 90] / [-180, 180] when attaching geocoordinates
    pub validate_coordinates: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            initial_row_capacity: 1024,
            double_delete: DoubleDeletePolicy::Ignore,
            validate_coordinates: true,
        }
    }
}

impl OracleConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| OracleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_row_capacity > MAX_ROW_CAPACITY {
            return Err(OracleError::Config(format!(
                "initial_row_capacity {} exceeds the maximum of {}",
                self.initial_row_capacity, MAX_ROW_CAPACITY
            )));
        }
        Ok(())
    }

    /// Load a TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| OracleError::Config(e.to_string()))
    }
}

/// Builder for [`OracleCore`] with custom configuration
///
/// # Examples
///
/// ```
/// use track_oracle::{DoubleDeletePolicy, OracleBuilder};
///
/// let oracle = OracleBuilder::new()
///     .row_capacity(10_000)
///     .double_delete(DoubleDeletePolicy::Error)
///     .build()
///     .unwrap();
/// assert_eq!(oracle.stats().live_rows, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OracleBuilder {
    config: OracleConfig,
}

impl OracleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing config
    pub fn config(mut self, config: OracleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn row_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_row_capacity = capacity;
        self
    }

    pub fn double_delete(mut self, policy: DoubleDeletePolicy) -> Self {
        self.config.double_delete = policy;
        self
    }

    pub fn validate_coordinates(mut self, validate: bool) -> Self {
        self.config.validate_coordinates = validate;
        self
    }

    /// Validate the config and create the oracle
    pub fn build(self) -> Result<OracleCore> {
        self.config.validate()?;
        Ok(OracleCore::with_config(self.config))
    }
}
