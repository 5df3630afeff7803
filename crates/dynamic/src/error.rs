use std::fmt;

use thiserror::Error;

use crate::{Signature, TypeDesc};

/// Reasons a list of entries cannot be bound into a chain.
///
/// These are detected before any stage is called. Positions are zero-based
/// indices into the candidate chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("cannot bind an empty chain")]
    Empty,

    #[error("entry {position} is a value of type `{found}`, not a stage")]
    NotInvocable { position: usize, found: TypeDesc },

    #[error("stage `{stage}` at position {position} declares no outputs")]
    NoOutputs { position: usize, stage: String },

    #[error(
        "last output of stage `{stage}` at position {position} is `{found}`, expected the error type `{expected}`"
    )]
    MissingErrorSlot {
        position: usize,
        stage: String,
        found: TypeDesc,
        expected: TypeDesc,
    },

    #[error(
        "stage `{from}` at position {position} produces {produced} value(s), but stage `{to}` takes {expected} input(s)"
    )]
    ArityMismatch {
        position: usize,
        from: String,
        to: String,
        produced: usize,
        expected: usize,
    },

    #[error(
        "cannot pass output {index} of stage `{from}` at position {position} (`{output}`) to input {index} of stage `{to}` (`{input}`)"
    )]
    TypeMismatch {
        position: usize,
        index: usize,
        from: String,
        to: String,
        output: TypeDesc,
        input: TypeDesc,
    },

    #[error("no entry named `{name}` is registered (position {position})")]
    UnknownEntry { position: usize, name: String },

    #[error("bound chain has signature `{found}`, but `{expected}` was requested")]
    SignatureMismatch { expected: Signature, found: Signature },
}

/// Which side of a stage a [`ContractViolation`] concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => f.write_str("input"),
            Side::Output => f.write_str("output"),
        }
    }
}

/// Values crossing an erased stage did not match its declared signature.
///
/// Validated chains only produce this when a stage built with
/// [`ErasedStage::from_raw`](crate::ErasedStage::from_raw) returns something
/// other than what it declares, or when a caller passes the wrong values to
/// [`Bound::call`](crate::Bound::call).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("stage `{stage}` got {found} {side} value(s), but declares {expected}")]
    Count {
        stage: String,
        side: Side,
        expected: usize,
        found: usize,
    },

    #[error("{side} {index} of stage `{stage}` is not a `{expected}`")]
    Type {
        stage: String,
        side: Side,
        index: usize,
        expected: TypeDesc,
    },

    #[error("values do not unpack into `{expected}`")]
    Unpack { expected: &'static str },
}
