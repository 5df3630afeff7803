use crate::Stage;

/// Composes two stages into one.
///
/// The returned [`Bind`] calls `first`, then passes its output to `second`.
/// If `first` fails, `second` is never called and the error is returned
/// unchanged.
///
/// The chain is checked when it is built, not when it is called:
/// - `B::Input` must be exactly `A::Output`.
/// - Both stages must share the same error type.
///
/// ```compile_fail
/// use splice_core::{bind, from_fn};
///
/// let parse = from_fn(|s: String| s.parse::<i32>());
/// let shout = from_fn(|s: String| Ok::<_, std::num::ParseIntError>(s.to_uppercase()));
///
/// // `i32` cannot be fed into a stage expecting a `String`.
/// let chain = bind(parse, shout);
/// ```
///
/// Longer chains are built by nesting calls, or with the [`bind!`](crate::bind!)
/// macro.
pub const fn bind<A, B>(first: A, second: B) -> Bind<A, B>
where
    A: Stage,
    B: Stage<Input = A::Output, Error = A::Error>,
{
    Bind { first, second }
}

/// A stage that calls two stages sequentially.
///
/// Created by [`bind`], [`bind!`](crate::bind!) or [`Stage::then()`].
///
/// The input type is that of the first stage and the output type is that of
/// the second. A `Bind` owns no state besides its two parts, so it can be
/// called any number of times, and from several threads at once when both
/// parts allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bind<A, B> {
    first: A,
    second: B,
}

impl<A, B> Bind<A, B> {
    /// Returns the stage that runs first.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Returns the stage that runs second.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Splits the composition back into its two parts.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> Stage for Bind<A, B>
where
    A: Stage,
    B: Stage<Input = A::Output, Error = A::Error>,
{
    type Input = A::Input;
    type Output = B::Output;
    type Error = A::Error;

    /// Calls the first stage and passes its output to the second.
    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        let output = self.first.call(input)?;
        self.second.call(output)
    }
}
