//! Directory presentation settings.

use chamber_core::RowSizes;
use chamber_core::directory::CompositionPolicy;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_first_row() -> usize {
    5
}

const fn default_second_row() -> usize {
    4
}

const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Tiles on odd-numbered grid rows.
    #[serde(default = "default_first_row")]
    pub first_row: usize,

    /// Tiles on even-numbered grid rows.
    #[serde(default = "default_second_row")]
    pub second_row: usize,

    /// How query, category, and type selections combine.
    #[serde(default)]
    pub policy: CompositionPolicy,

    /// Default number of rows printed by list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            first_row: default_first_row(),
            second_row: default_second_row(),
            policy: CompositionPolicy::default(),
            default_limit: default_limit(),
        }
    }
}

impl DirectoryConfig {
    /// Grid row sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if either row size is zero.
    pub fn row_sizes(&self) -> Result<RowSizes, ConfigError> {
        RowSizes::new(self.first_row, self.second_row).map_err(|e| ConfigError::InvalidValue {
            field: "directory.first_row/second_row".into(),
            reason: e.to_string(),
        })
    }
}
