//! Synchronization status of a tree node
//!
//! The set of values is closed. There is no transition table: any status can
//! follow any other, and deciding which one applies is left to the
//! synchronization driver.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::errors::DomainError;

/// Synchronization status of a [`SynchronizedItem`](super::SynchronizedItem)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Local and remote have not been reconciled yet
    #[default]
    NotSynchronized,
    Synchronized,
    /// A synchronization pass is in progress
    Synchronizing,
    SynchronizedWithConflict,
    SynchronizedWithWarning,
    SynchronizedWithError,
    SynchronizedWithInfo,
}

impl Status {
    /// Every status, in declaration order
    pub const ALL: [Status; 7] = [
        Status::NotSynchronized,
        Status::Synchronized,
        Status::Synchronizing,
        Status::SynchronizedWithConflict,
        Status::SynchronizedWithWarning,
        Status::SynchronizedWithError,
        Status::SynchronizedWithInfo,
    ];

    /// Returns true only for [`Status::Synchronized`]
    pub fn is_synchronized(&self) -> bool {
        matches!(self, Status::Synchronized)
    }

    /// Returns true if the node needs user attention
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            Status::SynchronizedWithConflict | Status::SynchronizedWithError
        )
    }

    /// Returns true if a synchronization pass finished for the node, with or
    /// without remarks
    pub fn is_settled(&self) -> bool {
        !matches!(self, Status::NotSynchronized | Status::Synchronizing)
    }

    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotSynchronized => "not_synchronized",
            Status::Synchronized => "synchronized",
            Status::Synchronizing => "synchronizing",
            Status::SynchronizedWithConflict => "synchronized_with_conflict",
            Status::SynchronizedWithWarning => "synchronized_with_warning",
            Status::SynchronizedWithError => "synchronized_with_error",
            Status::SynchronizedWithInfo => "synchronized_with_info",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidArgument {
                argument: "status",
                reason: format!("unknown status '{s}'"),
            })
    }
}
