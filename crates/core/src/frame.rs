//! Per-frame snapshot handed to a renderer.

use crate::geometry::{field_to_screen, Camera, ScreenSize};
use crate::particle::{ParticleColor, ParticleId, ParticleShape};
use crate::particle_engine::ParticleEngine;
use crate::prng::RandomSource;
use crate::vector::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One particle as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameParticle {
    pub id: ParticleId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Pixel coordinates, origin top-left, y down.
    pub screen: Vec2,
    pub color: ParticleColor,
    pub shape: ParticleShape,
}

/// Every particle's state and screen position after `step` steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub step: u64,
    pub particles: Vec<FrameParticle>,
}

impl<R: RandomSource> ParticleEngine<R> {
    /// Projects every particle through `camera` onto a `screen`-sized
    /// surface.
    pub fn frame(&self, camera: &Camera, screen: ScreenSize) -> Frame {
        let particles = self
            .particles()
            .iter()
            .map(|p| FrameParticle {
                id: p.id(),
                position: p.position,
                velocity: p.velocity,
                screen: field_to_screen(p.position, camera, screen),
                color: p.color,
                shape: p.shape,
            })
            .collect();
        Frame {
            step: self.steps(),
            particles,
        }
    }
}
