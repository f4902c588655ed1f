//! Error types for antcolony.
//!
//! Two families reach the caller: load errors (the graph description could
//! not be turned into a topology) and configuration errors (the run cannot
//! start with these parameters). Both leave prior state untouched.
//!
//! Ants that get stuck are not errors. They are recorded per ant as
//! [`TripOutcome::DeadEnd`](crate::colony::TripOutcome::DeadEnd) and the
//! iteration carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for antcolony operations.
pub type ColonyResult<T> = Result<T, ColonyError>;

/// Which configured vertex failed a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRole {
    /// The vertex every ant starts from.
    Start,
    /// The goal vertex of point-to-point mode.
    Finish,
}

impl std::fmt::Display for VertexRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Finish => write!(f, "finish"),
        }
    }
}

/// Unified error type for all antcolony operations.
#[derive(Debug, Error)]
pub enum ColonyError {
    // ===== Load Errors =====
    /// Graph description file does not exist.
    #[error("Graph file not found: {}", path.display())]
    GraphNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Graph description is not a readable document.
    #[error("Malformed graph description: {message}")]
    MalformedGraph {
        /// Parser diagnostic.
        message: String,
    },

    /// Graph description has no vertex list.
    #[error("Graph description has no vertex list")]
    MissingVertices,

    /// An edge references a vertex that does not exist.
    #[error("Edge {edge} ({vertex1} -> {vertex2}) references a vertex outside 0..{vertex_count}")]
    EdgeOutOfRange {
        /// Position of the edge in the description.
        edge: usize,
        /// First endpoint.
        vertex1: i64,
        /// Second endpoint.
        vertex2: i64,
        /// Number of vertices loaded.
        vertex_count: usize,
    },

    /// An edge weight is unparsable, negative, or not finite.
    #[error("Edge {edge} has invalid weight '{weight}'")]
    InvalidWeight {
        /// Position of the edge in the description.
        edge: usize,
        /// Raw weight text.
        weight: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Start or finish vertex outside the bound graph.
    #[error("Configuration error: {role} vertex {vertex} outside 0..{vertex_count}")]
    VertexOutOfRange {
        /// Which vertex was rejected.
        role: VertexRole,
        /// Configured vertex id.
        vertex: usize,
        /// Vertex count of the bound graph.
        vertex_count: usize,
    },

    /// Ant count of zero.
    #[error("Configuration error: ant count must be at least 1")]
    ZeroAnts,

    /// Graph too small to route over.
    #[error("Configuration error: graph has {vertex_count} vertices, at least 2 required")]
    GraphTooSmall {
        /// Vertex count of the bound graph.
        vertex_count: usize,
    },

    /// Point-to-point trip would be empty.
    #[error("Configuration error: start and finish are both vertex {vertex}")]
    StartEqualsFinish {
        /// The shared vertex id.
        vertex: usize,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ColonyError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a malformed-graph error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedGraph {
            message: message.into(),
        }
    }

    /// Check if this error came from loading a graph description.
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::GraphNotFound { .. }
                | Self::Io(_)
                | Self::MalformedGraph { .. }
                | Self::MissingVertices
                | Self::EdgeOutOfRange { .. }
                | Self::InvalidWeight { .. }
        )
    }

    /// Check if this error rejected a configuration.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::VertexOutOfRange { .. }
                | Self::ZeroAnts
                | Self::GraphTooSmall { .. }
                | Self::StartEqualsFinish { .. }
                | Self::YamlParse(_)
                | Self::Validation(_)
        )
    }
}
