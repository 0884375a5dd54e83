use thiserror::Error;

/// Top-level error type for the strake topology layer.
#[derive(Debug, Error)]
pub enum StrakeError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to topological queries and traversal.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// An operation received a shape of a kind it was not designed for,
    /// or a kind tag outside the closed set of topological kinds.
    #[error("wrong topological type: expected {expected}, got {actual}")]
    WrongTopologicalType {
        expected: &'static str,
        actual: String,
    },

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to construction and query operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`StrakeError`].
pub type Result<T> = std::result::Result<T, StrakeError>;
