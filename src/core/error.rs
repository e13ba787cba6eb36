/*!
# Unified Error Type

This module provides a unified error enum that consolidates all Spantree error types
for better ergonomics and error handling consistency.

Errors that originate from a client command render as the single-line diagnostic
sent back to that client; the session keeps running. I/O errors on a client socket
tear the session down instead.
*/

use std::error::Error;
use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpantreeError>;

/// Unified error type for all Spantree operations.
///
/// This enum consolidates all error types for better error handling and pattern matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpantreeError {
    /// Empty command line
    EmptyMessage,

    /// Command token not recognized
    UnknownCommand(String),

    /// Command recognized but arguments are malformed
    BadArguments(String),

    /// A numeric argument failed to parse
    NotANumber(String),

    /// MST strategy name not registered
    UnknownStrategy(String),

    /// Operation requires a graph but the session has none
    NoGraph,

    /// Operation requires a connected graph
    NotConnected,

    /// Edge endpoints are equal
    SelfLoop(String),

    /// Edge already present in the graph
    DuplicateEdge(String),

    /// Vertex id not present in the graph
    VertexNotFound(String),

    /// Read/write failure on a socket or file
    Io(String),

    /// Programming bug: a stated precondition was violated
    Internal(String),
}

impl SpantreeError {
    /// Creates a malformed-arguments error.
    pub fn bad_arguments(message: impl Into<String>) -> Self {
        SpantreeError::BadArguments(message.into())
    }

    /// Creates an unknown-strategy error.
    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        SpantreeError::UnknownStrategy(name.into())
    }

    /// Creates a self-loop error.
    pub fn self_loop(message: impl Into<String>) -> Self {
        SpantreeError::SelfLoop(message.into())
    }

    /// Creates a duplicate-edge error.
    pub fn duplicate_edge(message: impl Into<String>) -> Self {
        SpantreeError::DuplicateEdge(message.into())
    }

    /// Creates a vertex-not-found error.
    pub fn vertex_not_found(message: impl Into<String>) -> Self {
        SpantreeError::VertexNotFound(message.into())
    }

    /// Creates an internal-invariant error.
    pub fn internal(message: impl Into<String>) -> Self {
        SpantreeError::Internal(message.into())
    }

    /// Returns true if the error indicates a programming bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, SpantreeError::Internal(_))
    }
}

impl fmt::Display for SpantreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SpantreeError::EmptyMessage => write!(f, "empty message"),
            SpantreeError::UnknownCommand(msg) => write!(f, "unknown command: {}", msg),
            SpantreeError::BadArguments(msg) => write!(f, "malformed arguments: {}", msg),
            SpantreeError::NotANumber(msg) => write!(f, "expected a number, got: {}", msg),
            SpantreeError::UnknownStrategy(msg) => write!(f, "unknown MST strategy: {}", msg),
            SpantreeError::NoGraph => write!(f, "no graph exists for this session"),
            SpantreeError::NotConnected => {
                write!(f, "graph is not connected and therefore has no MST")
            }
            SpantreeError::SelfLoop(msg) => write!(f, "self-loops are not allowed: {}", msg),
            SpantreeError::DuplicateEdge(msg) => write!(f, "edge already exists: {}", msg),
            SpantreeError::VertexNotFound(msg) => write!(f, "vertex not found: {}", msg),
            SpantreeError::Io(msg) => write!(f, "I/O error: {}", msg),
            SpantreeError::Internal(msg) => write!(f, "internal invariant violated: {}", msg),
        }
    }
}

impl Error for SpantreeError {}

impl From<std::io::Error> for SpantreeError {
    fn from(e: std::io::Error) -> Self {
        SpantreeError::Io(e.to_string())
    }
}

impl From<std::num::ParseIntError> for SpantreeError {
    fn from(e: std::num::ParseIntError) -> Self {
        SpantreeError::NotANumber(e.to_string())
    }
}
