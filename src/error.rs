//! Error types for subsurf.
//!
//! Every fallible operation in the crate returns [`Result`], so callers see
//! invalid input and broken topology as values rather than panics.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building, subdividing or exchanging meshes.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// The input does not satisfy the requirements of the requested operation,
    /// e.g. Loop subdivision on a mesh that is not a pure triangulation.
    ///
    /// Raised before anything is modified.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Constructing a face or classifying a vertex would break the 2-manifold
    /// invariant.
    #[error("topology error: {details}")]
    Topology {
        /// Description of the offending configuration.
        details: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create a topology error from anything printable.
    pub fn topology<T: std::fmt::Display>(details: T) -> Self {
        MeshError::Topology {
            details: details.to_string(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this error reports a broken manifold invariant.
    pub fn is_topology(&self) -> bool {
        matches!(self, MeshError::Topology { .. })
    }

    /// Whether this error reports input rejected up front.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MeshError::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MeshError::topology("edge (0, 1) already has two faces");
        assert_eq!(
            err.to_string(),
            "topology error: edge (0, 1) already has two faces"
        );
        assert!(err.is_topology());
        assert!(!err.is_invalid_input());

        let err = MeshError::InvalidInput("not a triangle mesh".into());
        assert_eq!(err.to_string(), "invalid input: not a triangle mesh");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_invalid_param() {
        let err = MeshError::invalid_param("times", -1, "must be non-negative");
        assert_eq!(
            err.to_string(),
            "invalid parameter: times = -1 (must be non-negative)"
        );
    }
}
