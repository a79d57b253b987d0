//! Elementary 3D vector operations.
//!
//! `Vec3` is glam's f64 vector. The free functions below are the small set
//! every other module leans on; `normalize` is the zero-safe variant so a
//! zero-length input can never poison a simulation with NaN.

pub use glam::{DVec2 as Vec2, DVec3 as Vec3};

/// Euclidean length of `v`.
pub fn length(v: Vec3) -> f64 {
    v.length()
}

/// Unit vector in the direction of `v`, or the zero vector when `v` has
/// zero (or non-finite) length.
pub fn normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Dot product.
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.dot(b)
}

/// Right-handed cross product.
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}
