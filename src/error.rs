//! Error types shared by the library and the binary.
//!
//! Outline precondition failures are not errors: they are collected as
//! [`Diagnostic`](crate::outline::Diagnostic)s so the tree can still be built.

use thiserror::Error;

/// Failures that stop a command from completing.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the input page or writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The widget data could not be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The configured variant name is not recognised.
    #[error("unknown variant {0:?} (expected \"scroll\" or \"fragment\")")]
    UnknownVariant(String),
}

/// Failures raised while handling a node activation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// No element in the page carries the activated node's identifier.
    #[error("no element with id {0:?} in the page")]
    MissingTarget(String),
}

/// Result alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, Error>;
