//! Error types for catalog and citation-graph operations

use crate::graph::PublicationId;
use thiserror::Error;

/// Errors that can occur in catalog operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Invalid authors: {0:?} (expected a non-empty list of \"Last, First\" names)")]
    InvalidAuthors(Vec<String>),

    #[error("Invalid author name: {0:?} (expected \"Last, First\")")]
    InvalidAuthorName(String),

    #[error("Invalid year: {0} (expected 1500 up to next year)")]
    InvalidYear(i32),

    #[error("Invalid issue number: {0} (must be larger than zero)")]
    InvalidIssueNumber(i64),

    #[error("Invalid weight: {0} (must be larger than zero)")]
    InvalidWeight(f64),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Unknown publication id: {0}")]
    UnknownPublicationId(PublicationId),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
