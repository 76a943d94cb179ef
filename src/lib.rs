pub mod attributes;
pub mod config;
pub mod nodes;
pub mod types;
pub mod walker;

use thiserror::Error;

use crate::types::Oid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("unrecognized node type: {tag} ({context})")]
    UnrecognizedNode { tag: String, context: &'static str },

    #[error("cannot handle unplanned sub-select")]
    UntransformedSubLink,

    #[error("could not find array type for data type {0}")]
    MissingArrayType(Oid),

    #[error("stack depth limit exceeded: depth {depth} exceeds limit {limit}")]
    StackDepthExceeded { depth: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, TreeError>;

impl TreeError {
    pub fn unrecognized(tag: impl std::fmt::Display, context: &'static str) -> Self {
        TreeError::UnrecognizedNode {
            tag: tag.to_string(),
            context,
        }
    }

    /// Get the PostgreSQL error code for this error
    pub fn sqlstate(&self) -> &'static str {
        match self {
            TreeError::UnrecognizedNode { .. } => "XX000", // internal_error
            TreeError::UntransformedSubLink => "XX000",    // internal_error
            TreeError::MissingArrayType(_) => "42704",     // undefined_object
            TreeError::StackDepthExceeded { .. } => "54001", // statement_too_complex
        }
    }

    /// Internal errors indicate a malformed tree rather than a bad statement
    pub fn is_internal(&self) -> bool {
        self.sqlstate() == "XX000"
    }
}
