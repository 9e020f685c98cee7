use std::path::PathBuf;
use thiserror::Error;

/// Raised while building a [`CoordinateTree`](crate::coordinates::CoordinateTree)
/// out of a JSON `coordinates` value. `path` is a JSON pointer relative to the
/// `coordinates` member.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("expected an array at '{path}'")]
    NotAnArray { path: String },

    #[error("position at '{path}' needs two numbers")]
    IncompletePair { path: String },

    #[error("position at '{path}' has a non-numeric ordinate")]
    NonNumericOrdinate { path: String },
}

/// Raised by a [`Projector`](crate::projection::Projector).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("({latitude}, {longitude}) is outside the projection domain")]
    OutOfDomain { latitude: f64, longitude: f64 },

    #[error("transform produced a non-finite position ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    #[error("projection backend failed: {0}")]
    Backend(String),
}

/// The main error type for a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse GeoJSON file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse GeoJSON file {path}: document is empty")]
    EmptyDocument { path: PathBuf },

    #[error("Document has no 'features' array")]
    MissingFeatures,

    #[error("Feature {feature} has malformed geometry: {reason}")]
    MalformedGeometry { feature: usize, reason: String },

    #[error("Feature {feature} could not be projected: {source}")]
    Projection {
        feature: usize,
        #[source]
        source: ProjectionError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
