//! Engine construction parameters.

use crate::error::EngineError;
use crate::params::{param_f64, param_u64, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_FIELD_SIZE: f64 = 20.0;
pub const DEFAULT_DAMPING: f64 = 0.98;
pub const DEFAULT_MAX_SPEED: f64 = 5.0;
pub const DEFAULT_SEED: u64 = 42;

/// Lowest speed cap the engine accepts; smaller requests are raised to it.
pub const MIN_MAX_SPEED: f64 = 0.1;

/// Everything needed to build a [`ParticleEngine`](crate::ParticleEngine)
/// reproducibly.
///
/// `damping` and `max_speed` are clamped by the engine rather than rejected,
/// so only `field_size` is checked by [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub count: usize,
    pub field_size: f64,
    pub damping: f64,
    pub max_speed: f64,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            count: 0,
            field_size: DEFAULT_FIELD_SIZE,
            damping: DEFAULT_DAMPING,
            max_speed: DEFAULT_MAX_SPEED,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    /// A default configuration with `count` particles.
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Reads a config from a JSON object, falling back to defaults per key.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", 0),
            field_size: param_f64(params, "field_size", DEFAULT_FIELD_SIZE),
            damping: param_f64(params, "damping", DEFAULT_DAMPING),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            seed: param_u64(params, "seed", DEFAULT_SEED),
        }
    }

    /// Fail-fast check for a usable field size.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.field_size.is_finite() || self.field_size <= 0.0 {
            return Err(EngineError::InvalidFieldSize(self.field_size));
        }
        Ok(())
    }
}
