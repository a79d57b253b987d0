#![deny(unsafe_code)]
//! Core of the particle-field simulation.
//!
//! Provides vector helpers, camera projection and attractor force laws, the
//! named vertex catalog, the `ParticleEngine` with its `Engine` trait,
//! serializable `Force` and `Scene` descriptions, the `Xorshift64` PRNG, and
//! parameter helpers.

pub mod config;
pub mod engine;
pub mod error;
pub mod force;
pub mod frame;
pub mod geometry;
pub mod params;
pub mod particle;
pub mod particle_engine;
pub mod prng;
pub mod scene;
pub mod vector;
pub mod vertex;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use force::Force;
pub use frame::{Frame, FrameParticle};
pub use geometry::{
    attractor_force, field_to_screen, multi_attractor_force, screen_to_field, AttractorSource,
    Camera, ScreenSize,
};
pub use particle::{Particle, ParticleColor, ParticleId, ParticleShape};
pub use particle_engine::ParticleEngine;
pub use prng::{RandomSource, Xorshift64};
pub use scene::Scene;
pub use vector::{Vec2, Vec3};
pub use vertex::{position_for, strict_position_for, NamedVertex, SacredVertex};
