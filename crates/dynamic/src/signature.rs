use std::fmt;

use crate::{Params, TypeDesc};

/// The declared shape of an erased stage.
///
/// A well-formed signature ends its outputs with the error-indicator type
/// ([`TypeDesc::error()`]); the outputs before it are the values handed to
/// the next stage. Signatures built with [`Signature::of`] are always well
/// formed, while [`Signature::new`] accepts anything and leaves the checking
/// to [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    inputs: Vec<TypeDesc>,
    outputs: Vec<TypeDesc>,
}

impl Signature {
    /// Creates a signature from explicit input and output descriptors.
    #[must_use]
    pub fn new(inputs: Vec<TypeDesc>, outputs: Vec<TypeDesc>) -> Self {
        Self { inputs, outputs }
    }

    /// Returns the signature of a stage taking `I` and returning `Result<O, _>`.
    #[must_use]
    pub fn of<I: Params, O: Params>() -> Self {
        let mut outputs = O::types();
        outputs.push(TypeDesc::error());
        Self {
            inputs: I::types(),
            outputs,
        }
    }

    #[must_use]
    pub fn inputs(&self) -> &[TypeDesc] {
        &self.inputs
    }

    /// Returns every declared output, including the trailing error slot.
    #[must_use]
    pub fn outputs(&self) -> &[TypeDesc] {
        &self.outputs
    }

    /// Returns the outputs passed on when the stage succeeds.
    ///
    /// These are all outputs except the last one.
    #[must_use]
    pub fn values(&self) -> &[TypeDesc] {
        match self.outputs.split_last() {
            Some((_, values)) => values,
            None => &[],
        }
    }

    /// Returns `true` if the last output is the error-indicator type.
    #[must_use]
    pub fn has_error_slot(&self) -> bool {
        self.outputs.last().is_some_and(TypeDesc::is_error)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn({}) -> ({})", List(&self.inputs), List(&self.outputs))
    }
}

struct List<'a>(&'a [TypeDesc]);

impl fmt::Display for List<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, desc) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{desc}")?;
        }
        Ok(())
    }
}
