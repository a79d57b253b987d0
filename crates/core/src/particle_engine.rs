//! The particle engine: placement, force accumulation, and integration.
//!
//! Forces are accumulated into each particle's acceleration by the `apply_*`
//! calls, then consumed and cleared by [`ParticleEngine::step`]. Callers
//! apply forces first and step second; a step reads whatever acceleration
//! has been accumulated since the previous step.
//!
//! Integration is explicit Euler with multiplicative velocity damping, a
//! hard speed cap, and a single-pass toroidal wrap on each axis.

use crate::config::{
    EngineConfig, DEFAULT_DAMPING, DEFAULT_FIELD_SIZE, DEFAULT_MAX_SPEED, DEFAULT_SEED,
    MIN_MAX_SPEED,
};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::force::Force;
use crate::geometry::{attractor_force, AttractorSource, DEFAULT_FALLOFF};
use crate::particle::{Particle, ParticleId};
use crate::prng::{RandomSource, Xorshift64};
use crate::vector::{cross, normalize, Vec3};
use crate::vertex::NamedVertex;
use serde_json::{json, Value};

/// Particles closer than this to a vortex center feel no vortex force.
pub const VORTEX_MIN_DISTANCE: f64 = 0.1;

/// Owns a particle collection and moves it through a cubic, wrap-around
/// domain centered on the origin.
///
/// One engine is a single mutable object with no internal locking. Hosts
/// that need cross-thread access serialize calls themselves.
#[derive(Debug, Clone)]
pub struct ParticleEngine<R: RandomSource = Xorshift64> {
    particles: Vec<Particle>,
    count: usize,
    field_size: f64,
    damping: f64,
    max_speed: f64,
    rng: R,
    next_id: u64,
    steps: u64,
}

impl ParticleEngine<Xorshift64> {
    /// Creates `count` particles placed in a field of side `field_size`,
    /// using the default seed.
    pub fn new(count: usize, field_size: f64) -> Self {
        Self::with_rng(count, field_size, Xorshift64::new(DEFAULT_SEED))
    }

    /// Builds an engine from a validated config.
    ///
    /// Returns `EngineError::InvalidFieldSize` for a non-positive or
    /// non-finite field size. Damping and max speed are clamped.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut engine = Self::with_rng(config.count, config.field_size, Xorshift64::new(config.seed));
        engine.set_damping(config.damping);
        engine.set_max_speed(config.max_speed);
        Ok(engine)
    }
}

impl<R: RandomSource> ParticleEngine<R> {
    /// Creates `count` particles using the supplied random source for
    /// positions and tags.
    pub fn with_rng(count: usize, field_size: f64, rng: R) -> Self {
        let mut engine = Self {
            particles: Vec::with_capacity(count),
            count,
            field_size,
            damping: DEFAULT_DAMPING,
            max_speed: DEFAULT_MAX_SPEED,
            rng,
            next_id: 0,
            steps: 0,
        };
        engine.place_particles();
        log::debug!(
            "particle engine created: {count} particles, field size {field_size}"
        );
        engine
    }

    /// Discards every particle and places `count` fresh ones at rest in the
    /// current field. Ids are new; the step counter restarts.
    pub fn reset(&mut self) {
        self.place_particles();
        self.steps = 0;
        log::debug!(
            "particle engine reset: {} particles, field size {}",
            self.count,
            self.field_size
        );
    }

    fn place_particles(&mut self) {
        let half = self.field_size / 2.0;
        self.particles.clear();
        for _ in 0..self.count {
            let id = ParticleId(self.next_id);
            self.next_id += 1;
            self.particles.push(Particle::random(id, half, &mut self.rng));
        }
    }

    /// Advances every particle by `dt`.
    ///
    /// Per particle, in order: `v += a·dt`, `v *= damping`, cap `|v|` at
    /// max speed, `p += v·dt`, wrap each axis once, clear `a`. Any `dt` is
    /// accepted, including zero and negative values.
    pub fn step(&mut self, dt: f64) {
        let half = self.field_size / 2.0;
        let size = self.field_size;
        let damping = self.damping;
        let max_speed = self.max_speed;

        for p in &mut self.particles {
            p.velocity += p.acceleration * dt;
            p.velocity *= damping;

            if p.velocity.length() > max_speed {
                p.velocity = normalize(p.velocity) * max_speed;
            }

            p.position += p.velocity * dt;
            p.position = Vec3::new(
                wrap_axis(p.position.x, half, size),
                wrap_axis(p.position.y, half, size),
                wrap_axis(p.position.z, half, size),
            );

            p.acceleration = Vec3::ZERO;
        }

        self.steps += 1;
        log::trace!("step {} (dt = {dt})", self.steps);
    }

    /// Accumulates the force of one point source on every particle.
    pub fn apply_attractor(&mut self, position: Vec3, strength: f64, falloff: f64) {
        for p in &mut self.particles {
            let force = attractor_force(p.position, position, strength, falloff);
            p.accumulate_force(force);
        }
    }

    /// Accumulates several point sources; equivalent to one
    /// [`apply_attractor`](Self::apply_attractor) call per source.
    pub fn apply_attractors(&mut self, sources: &[AttractorSource], falloff: f64) {
        for source in sources {
            self.apply_attractor(source.position, source.strength, falloff);
        }
    }

    /// Accumulates one inverse-square attractor per named vertex.
    pub fn apply_sacred_attractors(&mut self, vertices: &[NamedVertex], strength: f64) {
        for vertex in vertices {
            self.apply_attractor(vertex.position(), strength, DEFAULT_FALLOFF);
        }
    }

    /// Adds an independent random unit direction scaled by `strength` to
    /// each particle's acceleration.
    pub fn apply_turbulence(&mut self, strength: f64) {
        for p in &mut self.particles {
            p.acceleration += self.rng.next_unit_vector() * strength;
        }
    }

    /// Accumulates a tangential force `strength / r²` around `axis` through
    /// `center`. Particles within [`VORTEX_MIN_DISTANCE`] of the center are
    /// skipped.
    pub fn apply_vortex(&mut self, center: Vec3, strength: f64, axis: Vec3) {
        let axis = normalize(axis);
        for p in &mut self.particles {
            let delta = p.position - center;
            let distance = delta.length();
            if distance <= VORTEX_MIN_DISTANCE {
                continue;
            }
            let radial = delta / distance;
            let tangent = cross(axis, radial);
            let magnitude = strength / (distance * distance);
            p.accumulate_force(tangent * magnitude);
        }
    }

    /// Carries out a serialized force description.
    pub fn apply_force(&mut self, force: &Force) {
        match force {
            Force::Attractor {
                position,
                strength,
                falloff,
            } => self.apply_attractor(*position, *strength, *falloff),
            Force::Attractors { sources, falloff } => self.apply_attractors(sources, *falloff),
            Force::Vortex {
                center,
                strength,
                axis,
            } => self.apply_vortex(*center, *strength, *axis),
            Force::Turbulence { strength } => self.apply_turbulence(*strength),
            Force::Sacred { vertices, strength } => {
                self.apply_sacred_attractors(vertices, *strength)
            }
        }
    }

    /// Sets the field size used by the next `step` (wrap) and `reset`
    /// (placement). Existing positions are not moved.
    pub fn set_field_size(&mut self, size: f64) {
        self.field_size = size;
    }

    /// Sets velocity damping, clamped to [0, 1]. NaN maps to 1 (no damping).
    pub fn set_damping(&mut self, value: f64) {
        let clamped = if value.is_nan() {
            1.0
        } else {
            value.clamp(0.0, 1.0)
        };
        if clamped != value {
            log::warn!("damping {value} out of range, clamped to {clamped}");
        }
        self.damping = clamped;
    }

    /// Sets the speed cap, raised to at least [`MIN_MAX_SPEED`].
    pub fn set_max_speed(&mut self, value: f64) {
        let clamped = value.max(MIN_MAX_SPEED);
        if clamped != value {
            log::warn!("max speed {value} below minimum, raised to {clamped}");
        }
        self.max_speed = clamped;
    }

    /// Read access to the particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Write access to the particles for direct placement.
    ///
    /// The slice borrows the engine mutably, so no step or force call can
    /// run while it is held. The collection cannot grow or shrink through
    /// it; only [`reset`](Self::reset) changes membership.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particle count fixed at construction and restored by `reset`.
    pub fn target_count(&self) -> usize {
        self.count
    }

    pub fn field_size(&self) -> f64 {
        self.field_size
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Steps taken since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Fail-fast check of the current field size and every particle mass.
    ///
    /// Useful after a host has written particle state directly.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.field_size.is_finite() || self.field_size <= 0.0 {
            return Err(EngineError::InvalidFieldSize(self.field_size));
        }
        match self
            .particles
            .iter()
            .find(|p| !p.mass.is_finite() || p.mass <= 0.0)
        {
            Some(p) => Err(EngineError::InvalidMass(p.mass)),
            None => Ok(()),
        }
    }
}

impl<R: RandomSource> Engine for ParticleEngine<R> {
    fn step(&mut self, dt: f64) {
        ParticleEngine::<R>::step(self, dt);
    }

    fn particles(&self) -> &[Particle] {
        ParticleEngine::<R>::particles(self)
    }

    fn field_size(&self) -> f64 {
        self.field_size
    }

    fn params(&self) -> Value {
        json!({
            "count": self.count,
            "field_size": self.field_size,
            "damping": self.damping,
            "max_speed": self.max_speed,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": 0,
                "min": 0,
                "description": "Particles placed at construction and on reset"
            },
            "field_size": {
                "type": "number",
                "default": DEFAULT_FIELD_SIZE,
                "exclusive_min": 0.0,
                "description": "Side length of the cubic wrap-around domain"
            },
            "damping": {
                "type": "number",
                "default": DEFAULT_DAMPING,
                "min": 0.0,
                "max": 1.0,
                "description": "Velocity multiplier applied every step"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": MIN_MAX_SPEED,
                "description": "Speed cap applied after damping"
            }
        })
    }
}

/// Single-pass wrap of one coordinate into `[-half, half]`.
///
/// A coordinate more than one field width out of range is only moved back
/// by one width.
fn wrap_axis(coord: f64, half: f64, size: f64) -> f64 {
    if coord > half {
        coord - size
    } else if coord < -half {
        coord + size
    } else {
        coord
    }
}
