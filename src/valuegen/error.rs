//! Error types for value generation, mutation, and the codec.
//!
//! Every error carries the path of the offending node (`args[2].amount[0]`)
//! and, where relevant, the canonical type string, so a harness can log the
//! bad input and move on.

use std::fmt;

use thiserror::Error;

/// Invalid generator or mutator configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid {bound} length bounds: min {min} exceeds max {max}")]
    InvalidBounds {
        bound: &'static str,
        min: usize,
        max: usize,
    },

    #[error("invalid mutation rounds: min {min} exceeds max {max}")]
    InvalidRounds { min: usize, max: usize },

    #[error("invalid {name} {value}: must lie within [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("node action probabilities sum to {total}, which exceeds 1")]
    ActionProbabilitiesExceedOne { total: f64 },
}

/// A value whose runtime shape disagrees with its type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shape mismatch at {path}: expected {expected}, found {found}")]
pub struct ShapeMismatchError {
    /// Location of the offending node.
    pub path: String,
    /// Canonical type string of the descriptor at that node.
    pub expected: String,
    /// Description of the value found there.
    pub found: String,
}

impl ShapeMismatchError {
    pub fn new(path: &str, expected: impl fmt::Display, found: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            expected: expected.to_string(),
            found: found.into(),
        }
    }
}

/// Failure to decode an intermediate representation back into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed hex at {path}: {reason} (input {input:?})")]
    MalformedHex {
        path: String,
        input: String,
        reason: String,
    },

    #[error("length mismatch at {path}: {ty} requires {expected} bytes, found {found}")]
    LengthMismatch {
        path: String,
        ty: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed integer at {path}: {input:?} is not a base-10 {ty}")]
    MalformedInteger {
        path: String,
        ty: String,
        input: String,
    },

    #[error("integer out of range at {path}: {input} does not fit {ty}")]
    IntegerOutOfRange {
        path: String,
        ty: String,
        input: String,
    },

    #[error("arity mismatch at {path}: {ty} expects {expected} members, found {found}")]
    ArityMismatch {
        path: String,
        ty: String,
        expected: usize,
        found: usize,
    },

    #[error("missing field {field:?} at {path}")]
    MissingField { path: String, field: String },

    #[error("unexpected node at {path}: {ty} cannot be read from a JSON {found}")]
    UnexpectedNode {
        path: String,
        ty: String,
        found: &'static str,
    },

    #[error("unsupported type at {path}: {ty}")]
    UnsupportedType { path: String, ty: String },
}

impl DecodeError {
    /// Location of the node that failed to decode.
    pub fn path(&self) -> &str {
        match self {
            DecodeError::MalformedHex { path, .. }
            | DecodeError::LengthMismatch { path, .. }
            | DecodeError::MalformedInteger { path, .. }
            | DecodeError::IntegerOutOfRange { path, .. }
            | DecodeError::ArityMismatch { path, .. }
            | DecodeError::MissingField { path, .. }
            | DecodeError::UnexpectedNode { path, .. }
            | DecodeError::UnsupportedType { path, .. } => path,
        }
    }
}

/// Extend a node path with a positional index: `args` -> `args[3]`.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Extend a node path with a field name, falling back to the index when the
/// field is unnamed: `args` -> `args.amount` / `args.1`.
pub(crate) fn field_path(parent: &str, name: &str, index: usize) -> String {
    if name.is_empty() {
        format!("{parent}.{index}")
    } else {
        format!("{parent}.{name}")
    }
}
