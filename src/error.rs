//! Error types for gss

use crate::model::NodeId;
use thiserror::Error;

/// Result type alias for gss operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in graph-structured stack operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("graph is empty")]
    EmptyGraph,

    #[error("no child nodes to pop")]
    NoChildren,

    #[error("node not found")]
    NotFound,

    /// The handle refers to a node that has since been deleted
    #[error("stale node handle: {0}")]
    StaleHandle(NodeId),
}
