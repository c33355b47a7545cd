//! Model configuration files.
//!
//! A model is described in YAML, tagged by `model`:
//!
//! ```yaml
//! model: nearest_neighbor
//! n_qubits: 6
//! couplings: { jx: 1.0, jy: 1.0, jz: 0.5 }
//! fields: { hx: 0.2 }
//! periodic: true
//! rand_field: [0.1, -0.1, 0.0, 0.05, 0.0, -0.2]
//! ```
//!
//! Omitted keys take the model defaults. Configuration precedence
//! (highest to lowest):
//! 1. Environment variables (`ARVAK_SPIN_ATOL`, `ARVAK_SPIN_RTOL`, `ARVAK_SPIN_VERBOSE`)
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SpinResult;
use crate::hamiltonian::Tolerance;
use crate::model::{NearestNeighbor1d, NearestNeighborParams, PowerLaw, PowerLawParams, SpinModel};

/// A lattice model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelConfig {
    /// Nearest-neighbour chain.
    NearestNeighbor(NearestNeighborParams),
    /// Power-law chain.
    PowerLaw(PowerLawParams),
}

impl ModelConfig {
    /// Parse a YAML model description.
    pub fn from_yaml_str(source: &str) -> SpinResult<Self> {
        let config: ModelConfig =
            serde_yaml_ng::from_str(source).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML model description from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SpinResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Load from an optional file, then apply environment overrides.
    ///
    /// Without a file the default is a 4-site nearest-neighbour chain.
    pub fn load(config_file: Option<&Path>) -> SpinResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => ModelConfig::NearestNeighbor(NearestNeighborParams::new(4)),
        };
        let config = config.merge_env_with(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    ///
    /// Unset or unparseable variables leave the current value unchanged.
    #[must_use]
    pub fn merge_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_f64 = |key: &str| {
            let raw = lookup(key)?;
            match raw.trim().parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = %raw, "ignoring unparseable override");
                    None
                }
            }
        };
        let atol = parse_f64("ARVAK_SPIN_ATOL");
        let rtol = parse_f64("ARVAK_SPIN_RTOL");
        let verbose = lookup("ARVAK_SPIN_VERBOSE").map(|v| {
            matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        });

        let (tolerance, verbose_slot) = match &mut self {
            ModelConfig::NearestNeighbor(p) => (&mut p.tolerance, &mut p.verbose),
            ModelConfig::PowerLaw(p) => (&mut p.tolerance, &mut p.verbose),
        };
        if let Some(v) = atol {
            tolerance.atol = v;
        }
        if let Some(v) = rtol {
            tolerance.rtol = v;
        }
        if let Some(v) = verbose {
            *verbose_slot = v;
        }
        self
    }

    /// Run the parameter checks the model constructor runs.
    ///
    /// The random field is checked against the chain only when the model
    /// is built.
    pub fn validate(&self) -> SpinResult<()> {
        match self {
            ModelConfig::NearestNeighbor(p) => p.validate(),
            ModelConfig::PowerLaw(p) => p.validate(),
        }
    }

    /// Model kind as written in the `model` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelConfig::NearestNeighbor(_) => "nearest_neighbor",
            ModelConfig::PowerLaw(_) => "power_law",
        }
    }

    /// Build the described model.
    pub fn build(&self) -> SpinResult<SpinModel> {
        Ok(match self {
            ModelConfig::NearestNeighbor(p) => NearestNeighbor1d::new(p.clone())?.into(),
            ModelConfig::PowerLaw(p) => PowerLaw::new(p.clone())?.into(),
        })
    }

    /// Override the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tol: Tolerance) -> Self {
        match &mut self {
            ModelConfig::NearestNeighbor(p) => p.tolerance = tol,
            ModelConfig::PowerLaw(p) => p.tolerance = tol,
        }
        self
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
