//! Short-circuiting composition of fallible stages.
//!
//! This crate provides the building blocks for linear pipelines where every
//! step can fail:
//!
//! - [`Stage`] — a callable that maps a typed input to a `Result`
//! - [`bind`] and [`bind!`] — compose stages into a single [`Stage`]
//! - [`from_fn`] — adapt a plain function or closure into a [`Stage`]
//!
//! A composed stage runs its parts left to right, feeding each success value
//! into the next part and returning the first error it encounters unchanged.
//! Chains that do not line up are rejected by the type checker.
//!
//! ```
//! use splice_core::{Stage, bind, from_fn};
//!
//! #[derive(Debug, PartialEq)]
//! struct TooLarge(u32);
//!
//! impl std::fmt::Display for TooLarge {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{} is too large", self.0)
//!     }
//! }
//!
//! impl std::error::Error for TooLarge {}
//!
//! let double = |n: u32| if n > 50 { Err(TooLarge(n)) } else { Ok(n * 2) };
//!
//! let quadruple = bind!(from_fn(double), from_fn(double));
//!
//! assert_eq!(quadruple.call(10), Ok(40));
//! assert_eq!(quadruple.call(30), Err(TooLarge(60)));
//! ```

mod bind;
mod function;
mod macros;
mod stage;

pub use bind::{Bind, bind};
pub use function::{FnStage, from_fn};
pub use stage::Stage;
