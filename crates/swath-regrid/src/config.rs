//! Configuration for the regridder.

use serde::{Deserialize, Serialize};

use crate::backend::{self, Backend, Regridder};

/// Default lower bound on profiles handled by one parallel partition.
pub const DEFAULT_MIN_ROWS_PER_TASK: usize = 64;

/// Configuration for a regridding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegridConfig {
    /// Backend used for the accumulation pass.
    pub backend: Backend,

    /// Lower bound on profiles per partition for the accelerated backend.
    pub min_rows_per_task: usize,
}

impl Default for RegridConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            min_rows_per_task: DEFAULT_MIN_ROWS_PER_TASK,
        }
    }
}

impl RegridConfig {
    /// Configuration using the reference backend.
    pub fn reference() -> Self {
        Self {
            backend: Backend::Reference,
            ..Self::default()
        }
    }

    /// Configuration using the accelerated backend.
    pub fn accelerated() -> Self {
        Self {
            backend: Backend::Accelerated,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("REGRID_BACKEND") {
            config.backend = Backend::from_str(&val);
        }

        if let Ok(val) = std::env::var("REGRID_MIN_ROWS_PER_TASK") {
            if let Ok(rows) = val.parse() {
                config.min_rows_per_task = rows;
            }
        }

        config
    }

    /// Validate the configuration.
    ///
    /// `min_rows_per_task` is only read by the accelerated backend.
    pub fn validate(&self) -> Result<(), String> {
        if self.backend == Backend::Accelerated && self.min_rows_per_task == 0 {
            return Err("min_rows_per_task must be > 0".to_string());
        }
        Ok(())
    }

    /// Build the accumulation strategy for this configuration.
    pub fn regridder(&self) -> Box<dyn Regridder> {
        backend::select(self.backend, self.min_rows_per_task)
    }
}
