//! Error types for loading and triangulating polygons.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for triangulation operations.
pub type TriResult<T> = Result<T, TriError>;

/// Errors that can occur while loading or triangulating a polygon.
#[derive(Debug, Error)]
pub enum TriError {
    /// Method name is not one of the supported backends.
    #[error("unknown method: {0} (expected `earcut` or `cesium`)")]
    UnknownMethod(String),

    /// Input file could not be read.
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid GeoJSON for our purposes.
    #[error("parsing GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document has no polygon where one is required.
    #[error("missing polygon: {0}")]
    MissingPolygon(String),

    /// Polygon cannot be triangulated (too few distinct positions, bad projection).
    #[error("degenerate polygon: {0}")]
    Degenerate(String),

    /// The triangulation library rejected the input.
    #[error("triangulation failed: {0}")]
    Triangulation(String),

    /// An index buffer did not describe whole triangles or pointed outside the vertex buffer.
    #[error("malformed index buffer: {0}")]
    BadIndices(String),
}

impl TriError {
    /// Create an unknown method error.
    #[must_use]
    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod(name.into())
    }

    /// Create a missing polygon error.
    #[must_use]
    pub fn missing_polygon(details: impl Into<String>) -> Self {
        Self::MissingPolygon(details.into())
    }

    /// Create a degenerate polygon error.
    #[must_use]
    pub fn degenerate(details: impl Into<String>) -> Self {
        Self::Degenerate(details.into())
    }

    /// Create a triangulation failure error.
    #[must_use]
    pub fn triangulation(details: impl Into<String>) -> Self {
        Self::Triangulation(details.into())
    }

    /// Create a malformed index buffer error.
    #[must_use]
    pub fn bad_indices(details: impl Into<String>) -> Self {
        Self::BadIndices(details.into())
    }
}
