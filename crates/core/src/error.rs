//! Error types for the particle-field core.
//!
//! The simulation operations themselves never fail: degenerate numeric cases
//! are defused by floors and skips. These errors are only produced by the
//! optional fail-fast validators at construction boundaries and by the
//! host-facing scene loading path.

use thiserror::Error;

/// Errors produced by configuration validation and scene handling.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Field size was zero, negative, or not finite.
    #[error("invalid field size {0}: must be finite and greater than zero")]
    InvalidFieldSize(f64),

    /// A particle mass was zero, negative, or not finite.
    #[error("invalid mass {0}: must be finite and greater than zero")]
    InvalidMass(f64),

    /// The camera has no usable basis (view axis zero or parallel to `up`,
    /// or a non-positive field size).
    #[error("degenerate camera: view axis must be non-zero and not parallel to up, field size must be positive")]
    DegenerateCamera,

    /// Screen dimensions were not positive.
    #[error("invalid screen size ({width}, {height}): both dimensions must be positive")]
    InvalidScreenSize { width: f64, height: f64 },

    /// A strict vertex lookup was given a name outside the known set.
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// A scene description could not be parsed or failed validation.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// A file could not be read or written.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::InvalidScene(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_size_includes_value() {
        let err = EngineError::InvalidFieldSize(-3.5);
        let msg = format!("{err}");
        assert!(msg.contains("-3.5"), "missing value in: {msg}");
    }

    #[test]
    fn invalid_mass_includes_value() {
        let err = EngineError::InvalidMass(0.0);
        let msg = format!("{err}");
        assert!(msg.contains("mass"), "missing 'mass' in: {msg}");
        assert!(msg.contains('0'), "missing value in: {msg}");
    }

    #[test]
    fn degenerate_camera_mentions_up() {
        let msg = format!("{}", EngineError::DegenerateCamera);
        assert!(msg.contains("up"), "expected mention of up vector, got: {msg}");
    }

    #[test]
    fn invalid_screen_size_includes_dimensions() {
        let err = EngineError::InvalidScreenSize {
            width: 640.0,
            height: -1.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("640"), "missing width in: {msg}");
        assert!(msg.contains("-1"), "missing height in: {msg}");
    }

    #[test]
    fn unknown_vertex_includes_name() {
        let err = EngineError::UnknownVertex("Metatron".into());
        let msg = format!("{err}");
        assert!(msg.contains("Metatron"), "missing name in: {msg}");
    }

    #[test]
    fn serde_error_converts_to_invalid_scene() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err = EngineError::from(bad.unwrap_err());
        assert!(matches!(err, EngineError::InvalidScene(_)));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
