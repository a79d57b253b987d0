//! Camera-space projection and point-source forces.
//!
//! Two families of pure functions live here:
//!
//! - [`field_to_screen`] / [`screen_to_field`]: an orthographic mapping
//!   between simulation space and pixel space, driven by a [`Camera`].
//! - [`attractor_force`] / [`multi_attractor_force`]: an inverse-power point
//!   force with a minimum-distance floor and a symmetric magnitude cap.
//!
//! None of these fail. A camera whose view axis is parallel to its `up`
//! vector has no right vector; [`Camera::validate`] detects it, and the
//! projection functions called with such a camera collapse every point onto
//! the screen center (the zero-safe normalize yields a zero basis).

use crate::error::EngineError;
use crate::vector::{cross, dot, normalize, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Falloff exponent used when none is given: inverse square.
pub const DEFAULT_FALLOFF: f64 = 2.0;

/// Floor applied to the squared separation before the force law is
/// evaluated, so coincident points give a finite force.
pub const MIN_DISTANCE_SQUARED: f64 = 0.01;

/// Largest force magnitude an attractor may produce, for either sign.
pub const MAX_FORCE: f64 = 100.0;

/// Threshold under which a camera basis is treated as degenerate.
const BASIS_EPS: f64 = 1e-9;

/// Orthographic camera. Supplied fresh by the host on every projection call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// World-space width and height spanned by the view.
    pub field_size: f64,
}

impl Default for Camera {
    /// Looks down -z at the origin from (0, 0, 10), +y up, spanning 20 units.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            field_size: 20.0,
        }
    }
}

/// Orthonormal camera basis: view axis, right, and derived up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub view: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Builds the camera basis.
    ///
    /// For a degenerate camera (see [`Camera::validate`]) `right` and `up`
    /// come back as zero vectors.
    pub fn basis(&self) -> CameraBasis {
        let view = normalize(self.target - self.position);
        let right = normalize(cross(view, self.up));
        let up = cross(right, view);
        CameraBasis { view, right, up }
    }

    /// Fail-fast check for a usable basis and a positive field size.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.field_size.is_finite() || self.field_size <= 0.0 {
            return Err(EngineError::DegenerateCamera);
        }
        let view = normalize(self.target - self.position);
        if view == Vec3::ZERO || cross(view, self.up).length() < BASIS_EPS {
            return Err(EngineError::DegenerateCamera);
        }
        Ok(())
    }
}

/// Pixel dimensions of the host's drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Rejects zero, negative, and non-finite dimensions.
    pub fn validate(&self) -> Result<(), EngineError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(EngineError::InvalidScreenSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(800.0, 800.0)
    }
}

/// Projects a simulation-space position to a screen point in pixels.
///
/// The offset from the camera target is projected onto the camera's right
/// and up axes, normalized by the camera field size, shifted by one half,
/// and scaled by the screen dimensions. Depth along the view axis is
/// discarded.
pub fn field_to_screen(position: Vec3, camera: &Camera, screen: ScreenSize) -> Vec2 {
    let basis = camera.basis();
    let relative = position - camera.target;
    let x = dot(relative, basis.right);
    let y = dot(relative, basis.up);

    let nx = x / camera.field_size + 0.5;
    let ny = y / camera.field_size + 0.5;
    Vec2::new(nx * screen.width, ny * screen.height)
}

/// Maps a screen point back into simulation space.
///
/// The result lies in the plane through the camera target perpendicular to
/// the view axis. A `field_to_screen` / `screen_to_field` round trip is
/// exact only for positions already in that plane; anything off it comes
/// back flattened onto it.
pub fn screen_to_field(point: Vec2, camera: &Camera, screen: ScreenSize) -> Vec3 {
    let nx = point.x / screen.width;
    let ny = point.y / screen.height;

    let x = (nx - 0.5) * camera.field_size;
    let y = (ny - 0.5) * camera.field_size;

    let basis = camera.basis();
    camera.target + basis.right * x + basis.up * y
}

/// A point force source. Positive strength attracts, negative repels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractorSource {
    pub position: Vec3,
    pub strength: f64,
}

impl AttractorSource {
    pub fn new(position: Vec3, strength: f64) -> Self {
        Self { position, strength }
    }
}

/// Force exerted on a particle by a single point source.
///
/// `|F| = min(MAX_FORCE, |strength| / d^falloff)` along the unit vector from
/// the particle toward the source, flipped for negative strength. The
/// squared distance is floored at [`MIN_DISTANCE_SQUARED`] first, so a
/// particle sitting on the source gets a finite (zero-direction) result.
pub fn attractor_force(particle: Vec3, attractor: Vec3, strength: f64, falloff: f64) -> Vec3 {
    let delta = attractor - particle;
    let distance_squared = dot(delta, delta).max(MIN_DISTANCE_SQUARED);
    let distance = distance_squared.sqrt();
    let direction = delta / distance;

    let magnitude = (strength / distance.powf(falloff)).clamp(-MAX_FORCE, MAX_FORCE);
    direction * magnitude
}

/// Sum of [`attractor_force`] over every source. Empty input gives zero.
pub fn multi_attractor_force(particle: Vec3, sources: &[AttractorSource], falloff: f64) -> Vec3 {
    sources.iter().fold(Vec3::ZERO, |total, source| {
        total + attractor_force(particle, source.position, source.strength, falloff)
    })
}
