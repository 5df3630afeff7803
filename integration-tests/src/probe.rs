//! Stages that fail on demand and record that they ran.

use splice_core::{FnStage, from_fn};
use splice_dynamic::ErasedStage;
use thiserror::Error;

/// The value threaded through probe stages.
///
/// Bit `i` of `fail` makes the `i`-th probe stage fail. Every probe that
/// succeeds appends its name to `trail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Probe {
    pub fail: u8,
    pub trail: String,
}

impl Probe {
    #[must_use]
    pub fn new(fail: u8) -> Self {
        Self {
            fail,
            trail: String::new(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("probe `{0}` failed")]
pub struct ProbeFailed(pub &'static str);

/// Returns the step function of the probe named `name`, which fails when bit
/// `bit` of the input is set.
pub fn step(name: &'static str, bit: u8) -> impl Fn(Probe) -> Result<Probe, ProbeFailed> + Copy {
    move |mut probe: Probe| {
        if probe.fail & (1 << bit) != 0 {
            return Err(ProbeFailed(name));
        }
        probe.trail.push_str(name);
        Ok(probe)
    }
}

/// A statically typed probe stage.
pub fn probe(
    name: &'static str,
    bit: u8,
) -> FnStage<impl Fn(Probe) -> Result<Probe, ProbeFailed> + Copy, Probe> {
    from_fn(step(name, bit))
}

/// An erased probe stage.
#[must_use]
pub fn erased_probe(name: &'static str, bit: u8) -> ErasedStage {
    ErasedStage::unary(name, step(name, bit))
}
