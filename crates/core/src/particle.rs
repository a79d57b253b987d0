//! Particle state and its cosmetic tags.

use crate::error::EngineError;
use crate::prng::RandomSource;
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identifier issued by the engine that created the particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(pub u64);

/// Color tag. Cosmetic only; no dynamics branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleColor {
    Red,
    Orange,
    Green,
    Blue,
    Indigo,
    Violet,
}

impl ParticleColor {
    /// Every color, in the order initial placement draws from.
    pub const ALL: [ParticleColor; 6] = [
        ParticleColor::Red,
        ParticleColor::Orange,
        ParticleColor::Green,
        ParticleColor::Blue,
        ParticleColor::Indigo,
        ParticleColor::Violet,
    ];

    /// `#RRGGBB` code for the host's renderer.
    pub fn hex(self) -> &'static str {
        match self {
            ParticleColor::Red => "#FF0000",
            ParticleColor::Orange => "#FF8000",
            ParticleColor::Green => "#00FF00",
            ParticleColor::Blue => "#0000FF",
            ParticleColor::Indigo => "#4B0082",
            ParticleColor::Violet => "#8B00FF",
        }
    }
}

/// Shape tag. Cosmetic only; no dynamics branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    Circle,
    Triangle,
    Square,
    Diamond,
    InvertedTriangle,
    CircleWithCrosshairs,
}

impl ParticleShape {
    /// Every shape, in the order initial placement draws from.
    pub const ALL: [ParticleShape; 6] = [
        ParticleShape::Circle,
        ParticleShape::Triangle,
        ParticleShape::Square,
        ParticleShape::Diamond,
        ParticleShape::InvertedTriangle,
        ParticleShape::CircleWithCrosshairs,
    ];

    /// Single-glyph rendering hint.
    pub fn glyph(self) -> char {
        match self {
            ParticleShape::Circle => '●',
            ParticleShape::Triangle => '▲',
            ParticleShape::Square => '◼',
            ParticleShape::Diamond => '◆',
            ParticleShape::InvertedTriangle => '▼',
            ParticleShape::CircleWithCrosshairs => '⊕',
        }
    }
}

/// A point mass moved by the engine.
///
/// Fields are public so a host (or a test) holding `particles_mut()` can
/// place particles directly. `mass` must stay positive; writing it through
/// [`Particle::set_mass`] enforces that, a raw field write does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    id: ParticleId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub mass: f64,
    pub color: ParticleColor,
    pub shape: ParticleShape,
}

impl Particle {
    /// Default mass of a freshly placed particle.
    pub const DEFAULT_MASS: f64 = 1.0;

    /// Creates a particle at rest with unit mass.
    pub fn new(id: ParticleId, position: Vec3, color: ParticleColor, shape: ParticleShape) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass: Self::DEFAULT_MASS,
            color,
            shape,
        }
    }

    /// Creates a particle at rest with a uniformly random position in
    /// `[-half_extent, half_extent]` per axis and random tags.
    pub(crate) fn random<R: RandomSource>(id: ParticleId, half_extent: f64, rng: &mut R) -> Self {
        let position = Vec3::new(
            sample_closed(rng, half_extent),
            sample_closed(rng, half_extent),
            sample_closed(rng, half_extent),
        );
        let color = ParticleColor::ALL[rng.next_usize(ParticleColor::ALL.len())];
        let shape = ParticleShape::ALL[rng.next_usize(ParticleShape::ALL.len())];
        Self::new(id, position, color, shape)
    }

    /// Identifier assigned at creation.
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Current speed, `|velocity|`.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Sets the mass, rejecting zero, negative, and non-finite values.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), EngineError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(EngineError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    /// Adds `force / mass` to the accumulated acceleration.
    pub(crate) fn accumulate_force(&mut self, force: Vec3) {
        self.acceleration += force / self.mass;
    }
}

/// Uniform sample in `[-half_extent, half_extent]`; the half-open draw is
/// contained in the closed interval.
fn sample_closed<R: RandomSource>(rng: &mut R, half_extent: f64) -> f64 {
    rng.next_range(-half_extent, half_extent)
}
