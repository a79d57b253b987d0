//! The `Engine` trait a host drives once per frame.
//!
//! The trait is object-safe so a host can hold `Box<dyn Engine>` without
//! caring which random source the engine was built with.

use crate::particle::Particle;
use serde_json::Value;

/// A steppable particle simulation.
pub trait Engine {
    /// Integrates every particle forward by `dt` seconds and clears the
    /// accumulated acceleration. Never fails.
    fn step(&mut self, dt: f64);

    /// Current particle state for rendering.
    fn particles(&self) -> &[Particle];

    /// Side length of the cubic simulation domain.
    fn field_size(&self) -> f64;

    /// Current tunables as a JSON object.
    fn params(&self) -> Value;

    /// Types, ranges, and defaults of every tunable in [`Engine::params`].
    fn param_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{ParticleColor, ParticleId, ParticleShape};
    use crate::vector::Vec3;
    use serde_json::json;

    /// Single particle drifting at constant velocity, no wrap.
    struct Drifter {
        particles: Vec<Particle>,
    }

    impl Drifter {
        fn new() -> Self {
            let mut p = Particle::new(
                ParticleId(0),
                Vec3::ZERO,
                ParticleColor::Blue,
                ParticleShape::Square,
            );
            p.velocity = Vec3::X;
            Self { particles: vec![p] }
        }
    }

    impl Engine for Drifter {
        fn step(&mut self, dt: f64) {
            for p in &mut self.particles {
                p.position += p.velocity * dt;
            }
        }

        fn particles(&self) -> &[Particle] {
            &self.particles
        }

        fn field_size(&self) -> f64 {
            f64::INFINITY
        }

        fn params(&self) -> Value {
            json!({"count": self.particles.len()})
        }

        fn param_schema(&self) -> Value {
            json!({"count": {"type": "integer", "default": 1}})
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let mut engine: Box<dyn Engine> = Box::new(Drifter::new());
        engine.step(0.5);
        assert_eq!(engine.particles()[0].position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn dyn_reference_exposes_params() {
        let engine = Drifter::new();
        let engine_ref: &dyn Engine = &engine;
        assert_eq!(engine_ref.params()["count"], 1);
        assert_eq!(engine_ref.param_schema()["count"]["type"], "integer");
    }
}
