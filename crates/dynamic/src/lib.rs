//! Runtime-checked composition of fallible stages.
//!
//! Where [`splice_core`] checks a chain in the type checker, this crate checks
//! it when the chain is built. That makes it possible to assemble pipelines
//! from names in a configuration file:
//!
//! - [`ErasedStage`] — a named stage with a declared [`Signature`]
//! - [`Entry`] — a candidate chain element, either a stage or a plain value
//! - [`bind`] — validate a list of entries and synthesize a [`Bound`] callable
//! - [`Registry`] and [`PipelineConfig`] — look entries up by name
//!
//! Malformed chains are rejected with a [`ConstructionError`] before any stage
//! is called. Failures of the stages themselves are returned, untouched, from
//! [`Bound::call`].
//!
//! ```
//! use splice_dynamic::{ErasedStage, bind};
//!
//! let parse = ErasedStage::unary("parse", |text: String| text.parse::<i64>());
//! let square = ErasedStage::unary("square", |n: i64| {
//!     n.checked_mul(n).ok_or("overflow")
//! });
//!
//! let chain = bind([parse, square])?.typed::<(String,), (i64,)>()?;
//!
//! assert_eq!(chain.call(("12".to_string(),)).unwrap(), (144,));
//! assert!(chain.call(("twelve".to_string(),)).is_err());
//! # Ok::<(), splice_dynamic::ConstructionError>(())
//! ```

mod bound;
mod config;
mod entry;
mod error;
mod executor;
mod params;
mod registry;
mod signature;
mod stage;
mod types;
mod validate;

pub use bound::{Bound, TypedBound, bind};
pub use config::{ConfigError, PipelineConfig};
pub use entry::{Constant, Entry};
pub use error::{ConstructionError, ContractViolation, Side};
pub use params::Params;
pub use registry::Registry;
pub use signature::Signature;
pub use stage::ErasedStage;
pub use types::{BoxError, TypeDesc, Value};
pub use validate::validate;
