//! Reproducible run description.
//!
//! A [`Scene`] captures everything needed to replay a simulation: engine
//! config (including the PRNG seed), the forces applied each step, step count
//! and timestep, and the camera and screen used for the final frame. Two
//! identical scenes produce identical frames.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::force::Force;
use crate::frame::Frame;
use crate::geometry::{Camera, ScreenSize};
use crate::particle_engine::ParticleEngine;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DT: f64 = 1.0 / 60.0;

fn default_dt() -> f64 {
    DEFAULT_DT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub forces: Vec<Force>,
    #[serde(default)]
    pub steps: usize,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub screen: ScreenSize,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            forces: Vec::new(),
            steps: 0,
            dt: DEFAULT_DT,
            camera: Camera::default(),
            screen: ScreenSize::default(),
        }
    }
}

impl Scene {
    /// Parses a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a scene file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Checks the engine config, camera, screen, and timestep.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.config.validate()?;
        self.camera.validate()?;
        self.screen.validate()?;
        if !self.dt.is_finite() {
            return Err(EngineError::InvalidScene(format!(
                "timestep must be finite, got {}",
                self.dt
            )));
        }
        Ok(())
    }

    /// Builds the engine and runs every step, applying all forces in order
    /// before each one. Returns the frame after the last step.
    pub fn run(&self) -> Result<Frame, EngineError> {
        self.validate()?;
        let mut engine = ParticleEngine::from_config(&self.config)?;
        log::info!(
            "running scene: {} particles, {} forces, {} steps at dt {}",
            engine.len(),
            self.forces.len(),
            self.steps,
            self.dt
        );
        for _ in 0..self.steps {
            for force in &self.forces {
                engine.apply_force(force);
            }
            engine.step(self.dt);
        }
        Ok(engine.frame(&self.camera, self.screen))
    }
}
