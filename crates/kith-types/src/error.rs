use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid {kind} id: {value}")]
    InvalidId { kind: &'static str, value: String },
}

/// Coarse classification shared by every Kith error type.
///
/// Callers use it to tell "nothing exists yet" apart from "exists but
/// exhausted" without matching on crate-specific variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The referenced set, state, feed, or group does not exist.
    NotFound,
    /// The state exists but pagination ran past its end.
    Exhausted,
    /// The caller is not permitted to perform the operation.
    NotAllowed,
    /// The request itself is malformed (bad id, zero page size, ...).
    InvalidInput,
    /// The target already exists or a concurrent update won a race.
    Conflict,
    /// Storage failure or broken internal invariant.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Exhausted => "exhausted",
            Self::NotAllowed => "not_allowed",
            Self::InvalidInput => "invalid_input",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
