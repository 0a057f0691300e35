//! Domain error types
//!
//! Errors raised by the entry hierarchy and the synchronization tree. All of
//! them are local to the caller: nothing here is retried or recovered
//! internally, and a failed call leaves the receiver unmodified.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required argument was empty or blank
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        argument: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The path cannot yield a usable file or directory name
    #[error("Malformed identity for path '{0}': no usable name")]
    MalformedIdentity(String),

    /// An index outside the bounds of a child collection
    #[error("Index {index} is out of range for a collection of {len} items")]
    OutOfRange {
        /// The requested index
        index: usize,
        /// The collection length at the time of the call
        len: usize,
    },
}

impl DomainError {
    /// Builds an `InvalidArgument` error for an empty or blank string argument
    pub(crate) fn empty_argument(argument: &'static str) -> Self {
        Self::InvalidArgument {
            argument,
            reason: "cannot be empty or whitespace".to_string(),
        }
    }
}
