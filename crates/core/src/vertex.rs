//! Named vertices of the pyramid and their positions in simulation space.
//!
//! A vertex is named by a string and carries a normalized height (0.0 on the
//! base plane, 1.0 at the apex). Known names sit at a fixed horizontal
//! offset; anything else falls back to the vertical axis.

use crate::error::EngineError;
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// The closed set of vertices with a known placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SacredVertex {
    ObiWan,
    Tata,
    Atlas,
    AkronGateway,
    Dojo,
    KingsChamber,
}

impl SacredVertex {
    pub const ALL: [SacredVertex; 6] = [
        SacredVertex::ObiWan,
        SacredVertex::Tata,
        SacredVertex::Atlas,
        SacredVertex::AkronGateway,
        SacredVertex::Dojo,
        SacredVertex::KingsChamber,
    ];

    /// Canonical name, exactly as it appears in the vertex catalog.
    pub fn name(self) -> &'static str {
        match self {
            SacredVertex::ObiWan => "OBI-WAN",
            SacredVertex::Tata => "TATA",
            SacredVertex::Atlas => "ATLAS",
            SacredVertex::AkronGateway => "Akron Gateway",
            SacredVertex::Dojo => "DOJO",
            SacredVertex::KingsChamber => "King's Chamber",
        }
    }

    /// Exact-match lookup by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Catalog height of this vertex.
    pub fn height(self) -> f64 {
        match self {
            SacredVertex::ObiWan => 1.0,
            SacredVertex::Tata | SacredVertex::Atlas | SacredVertex::AkronGateway => 0.0,
            SacredVertex::Dojo => 0.667,
            SacredVertex::KingsChamber => 0.333,
        }
    }

    /// Horizontal (x, z) placement.
    pub fn offset(self) -> (f64, f64) {
        match self {
            SacredVertex::Tata => (-1.0, -1.0),
            SacredVertex::Atlas => (1.0, -1.0),
            SacredVertex::AkronGateway => (0.0, 1.0),
            SacredVertex::ObiWan | SacredVertex::Dojo | SacredVertex::KingsChamber => (0.0, 0.0),
        }
    }

    /// Position at the given height.
    pub fn position_at(self, height: f64) -> Vec3 {
        let (x, z) = self.offset();
        Vec3::new(x, height, z)
    }
}

/// A name and normalized height, as produced by the vertex catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVertex {
    pub name: String,
    pub height: f64,
}

impl NamedVertex {
    pub fn new(name: impl Into<String>, height: f64) -> Self {
        Self {
            name: name.into(),
            height,
        }
    }

    /// The six canonical vertices at their catalog heights.
    pub fn sacred_vertices() -> Vec<NamedVertex> {
        SacredVertex::ALL
            .into_iter()
            .map(|v| NamedVertex::new(v.name(), v.height()))
            .collect()
    }

    /// Position of this vertex; see [`position_for`].
    pub fn position(&self) -> Vec3 {
        position_for(&self.name, self.height)
    }
}

impl From<SacredVertex> for NamedVertex {
    fn from(v: SacredVertex) -> Self {
        NamedVertex::new(v.name(), v.height())
    }
}

/// Resolves a vertex name and height to a position.
///
/// Known names get their fixed (x, z) offset with `height` as y. Unknown
/// names map to `(0, height, 0)`. Never fails.
pub fn position_for(name: &str, height: f64) -> Vec3 {
    match SacredVertex::from_name(name) {
        Some(v) => v.position_at(height),
        None => Vec3::new(0.0, height, 0.0),
    }
}

/// Like [`position_for`] but rejects names outside the known set.
pub fn strict_position_for(name: &str, height: f64) -> Result<Vec3, EngineError> {
    SacredVertex::from_name(name)
        .map(|v| v.position_at(height))
        .ok_or_else(|| EngineError::UnknownVertex(name.to_string()))
}
