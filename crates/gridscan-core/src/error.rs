//! Error types for gridscan

use thiserror::Error;

use crate::node::NodeId;

/// Result type for gridscan operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Failures surfaced by the host runtime or the scanner built on it
#[derive(Debug, Error)]
pub enum HostError {
    /// An underlying host query failed
    #[error("Host query failed: {0}")]
    Query(String),

    /// The requested node does not exist in the host's universe
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// Root access is required for the requested operation
    #[error("No root access on {0}")]
    NoRootAccess(NodeId),

    /// The nuke attempt was rejected by the host
    #[error("Crack failed on {node}: {reason}")]
    CrackFailed { node: NodeId, reason: String },
}

impl HostError {
    /// Shorthand for a query failure with a formatted reason
    pub fn query(reason: impl Into<String>) -> Self {
        HostError::Query(reason.into())
    }
}
