//! Serializable descriptions of the external forces a host can apply.
//!
//! A [`Force`] is data: it names one of the engine's force operations and
//! its arguments, so a scene file can list the forces applied each frame.
//! [`ParticleEngine::apply_force`](crate::ParticleEngine::apply_force)
//! carries them out.

use crate::geometry::{AttractorSource, DEFAULT_FALLOFF};
use crate::vector::Vec3;
use crate::vertex::NamedVertex;
use serde::{Deserialize, Serialize};

/// Strength used for named-vertex attractors when none is given.
pub const DEFAULT_SACRED_STRENGTH: f64 = 10.0;

fn default_falloff() -> f64 {
    DEFAULT_FALLOFF
}

fn default_axis() -> Vec3 {
    Vec3::Y
}

fn default_sacred_strength() -> f64 {
    DEFAULT_SACRED_STRENGTH
}

/// One force application, tagged by `"kind"` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Force {
    /// Single point source.
    Attractor {
        position: Vec3,
        strength: f64,
        #[serde(default = "default_falloff")]
        falloff: f64,
    },
    /// Several point sources sharing one falloff.
    Attractors {
        sources: Vec<AttractorSource>,
        #[serde(default = "default_falloff")]
        falloff: f64,
    },
    /// Tangential swirl around `axis` through `center`.
    Vortex {
        center: Vec3,
        strength: f64,
        #[serde(default = "default_axis")]
        axis: Vec3,
    },
    /// Random unit kick per particle.
    Turbulence { strength: f64 },
    /// Point sources placed at named vertices, falloff fixed at 2.
    Sacred {
        #[serde(default = "NamedVertex::sacred_vertices")]
        vertices: Vec<NamedVertex>,
        #[serde(default = "default_sacred_strength")]
        strength: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attractor_defaults_to_inverse_square() {
        let f: Force = serde_json::from_value(json!({
            "kind": "attractor",
            "position": [10.0, 0.0, 0.0],
            "strength": 5.0
        }))
        .unwrap();
        assert_eq!(
            f,
            Force::Attractor {
                position: Vec3::new(10.0, 0.0, 0.0),
                strength: 5.0,
                falloff: 2.0,
            }
        );
    }

    #[test]
    fn vortex_defaults_to_vertical_axis() {
        let f: Force = serde_json::from_value(json!({
            "kind": "vortex",
            "center": [0, 0, 0],
            "strength": 3
        }))
        .unwrap();
        assert!(matches!(f, Force::Vortex { axis, .. } if axis == Vec3::Y));
    }

    #[test]
    fn sacred_defaults_to_canonical_vertices() {
        let f: Force = serde_json::from_value(json!({"kind": "sacred"})).unwrap();
        match f {
            Force::Sacred { vertices, strength } => {
                assert_eq!(vertices, NamedVertex::sacred_vertices());
                assert_eq!(strength, DEFAULT_SACRED_STRENGTH);
            }
            other => panic!("expected sacred force, got {other:?}"),
        }
    }

    #[test]
    fn attractors_parse_source_list() {
        let f: Force = serde_json::from_value(json!({
            "kind": "attractors",
            "sources": [
                {"position": [1, 0, 0], "strength": 2.0},
                {"position": [0, 1, 0], "strength": -2.0}
            ],
            "falloff": 1.0
        }))
        .unwrap();
        match f {
            Force::Attractors { sources, falloff } => {
                assert_eq!(sources.len(), 2);
                assert_eq!(sources[1].strength, -2.0);
                assert_eq!(falloff, 1.0);
            }
            other => panic!("expected attractors, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let r = serde_json::from_value::<Force>(json!({"kind": "gravity", "strength": 1}));
        assert!(r.is_err());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let v = serde_json::to_value(Force::Turbulence { strength: 0.5 }).unwrap();
        assert_eq!(v, json!({"kind": "turbulence", "strength": 0.5}));
    }
}
