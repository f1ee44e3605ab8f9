use loadout_fuzzy::DEFAULT_CENTROID_SAMPLES;
use serde::{Deserialize, Serialize};

use crate::error::LoadoutError;

pub const SAMPLES_ENV: &str = "LOADOUT_CENTROID_SAMPLES";
pub const INPUT_MIN_ENV: &str = "LOADOUT_INPUT_MIN";
pub const INPUT_MAX_ENV: &str = "LOADOUT_INPUT_MAX";

const MAX_CENTROID_SAMPLES: usize = 100_001;

/// Range that raw user entry is clamped into before it reaches the
/// pipeline. The pipeline itself never clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
}

impl InputBounds {
    /// `None` for non-finite input.
    pub fn clamp(&self, raw: f64) -> Option<f64> {
        if !raw.is_finite() {
            return None;
        }
        Some(raw.clamp(self.min, self.max))
    }
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Centroid sample count. Higher lowers quantization error in the
    /// crisp score at a linear cost.
    pub centroid_samples: usize,
    pub input_bounds: InputBounds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            centroid_samples: DEFAULT_CENTROID_SAMPLES,
            input_bounds: InputBounds::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            centroid_samples: env_usize(
                SAMPLES_ENV,
                defaults.centroid_samples,
                2,
                MAX_CENTROID_SAMPLES,
            ),
            input_bounds: InputBounds {
                min: env_f64(INPUT_MIN_ENV, defaults.input_bounds.min),
                max: env_f64(INPUT_MAX_ENV, defaults.input_bounds.max),
            },
        }
    }

    pub fn with_centroid_samples(mut self, samples: usize) -> Self {
        self.centroid_samples = samples;
        self
    }

    pub fn validate(&self) -> Result<(), LoadoutError> {
        if self.centroid_samples < 2 {
            return Err(LoadoutError::Config(format!(
                "centroid_samples must be >= 2, got {}",
                self.centroid_samples
            )));
        }
        let InputBounds { min, max } = self.input_bounds;
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(LoadoutError::Config(format!(
                "input bounds must be finite and ordered, got [{min}, {max}]"
            )));
        }
        Ok(())
    }
}

fn env_usize(name: &str, default: usize, min: usize, max: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}
