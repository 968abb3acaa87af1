//! Common error types

use thiserror::Error;

/// Failure to parse an identifier out of a path segment or stored value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} id: {value:?}")]
pub struct ParseIdError {
    /// Which identifier was being parsed ("account", "post")
    pub kind: &'static str,
    /// The offending input
    pub value: String,
}
