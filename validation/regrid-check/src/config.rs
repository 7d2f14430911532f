//! Check request loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use swath_regrid::{Backend, DestinationGrid, RegridConfig};

/// A backend cross-check loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub swath: SwathShape,
    /// Destination grid. When absent, a grid covering the swath is used.
    #[serde(default)]
    pub destination: Option<DestinationGrid>,
    /// Cell counts used for the covering grid.
    #[serde(default = "default_cells")]
    pub cells: (usize, usize),
    /// Settings for the accelerated run.
    #[serde(default)]
    pub regrid: RegridConfig,
    /// Largest accepted difference between backend means.
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Timed runs per backend; the fastest is reported.
    #[serde(default = "default_repeats")]
    pub repeats: u32,
}

/// Shape of the synthetic swath.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwathShape {
    #[serde(default)]
    pub kind: SwathKind,
    pub profiles: usize,
    pub levels: usize,
    /// Blank every n-th sample; 0 keeps all samples.
    #[serde(default)]
    pub invalid_every: usize,
    #[serde(default)]
    pub seed: u32,
}

/// Which synthetic generator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwathKind {
    /// Radar curtain over terrain, cloud layer only.
    #[default]
    Curtain,
    /// Jittered profile spacing, every sample valid.
    Irregular,
}

fn default_cells() -> (usize, usize) {
    (300, 100)
}

fn default_tolerance() -> f32 {
    1e-4
}

fn default_repeats() -> u32 {
    3
}

impl CheckRequest {
    /// Load a request from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let request: CheckRequest = serde_yaml::from_str(&content)?;
        Ok(request)
    }

    /// Validate the request.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.swath.profiles == 0 || self.swath.levels == 0 {
            anyhow::bail!("swath must have at least one profile and one level");
        }
        if self.cells.0 == 0 || self.cells.1 == 0 {
            anyhow::bail!("cells must be > 0");
        }
        if let Some(dest) = &self.destination {
            dest.validate()?;
        }
        // The request settings only drive the accelerated run.
        RegridConfig {
            backend: Backend::Accelerated,
            ..self.regrid
        }
        .validate()
        .map_err(anyhow::Error::msg)?;
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            anyhow::bail!("tolerance must be >= 0");
        }
        if self.repeats == 0 {
            anyhow::bail!("repeats must be > 0");
        }
        Ok(())
    }
}
