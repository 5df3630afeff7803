use crate::bind::{Bind, bind};

/// The core trait for defining fallible stages.
///
/// A `Stage` takes an input and produces either an output or an error. Stages
/// are the units that [`bind`] strings together into longer chains.
///
/// ## Implementing `Stage`
///
/// Implement [`call()`](Stage::call), which takes an input and returns either
/// an output or an error. Stages needing several inputs or outputs use tuples.
/// For plain functions and closures, [`from_fn`](crate::from_fn) does this
/// for you.
///
/// ## Composing Stages
///
/// Stages are combined sequentially with [`Stage::then()`] or [`bind`]:
/// - The first stage's output type must match the second's input type.
/// - Both stages must use the same error type.
///
/// A failing stage ends the chain. Later stages are never called and the
/// error is handed back exactly as the failing stage produced it.
pub trait Stage {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the stage with the given input and returns a result.
    ///
    /// This is the only method required when implementing `Stage`.
    ///
    /// # Errors
    ///
    /// Each stage defines its own `Error` type, allowing it to determine what
    /// constitutes a failure within its domain.
    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error>;

    /// Chains this stage with another.
    ///
    /// Equivalent to [`bind(self, next)`](bind).
    ///
    /// # Example
    ///
    /// ```
    /// use std::convert::Infallible;
    /// use splice_core::Stage;
    ///
    /// struct Double;
    /// impl Stage for Double {
    ///     type Input = i32;
    ///     type Output = i32;
    ///     type Error = Infallible;
    ///
    ///     fn call(&self, input: i32) -> Result<i32, Self::Error> {
    ///         Ok(input * 2)
    ///     }
    /// }
    ///
    /// struct Increment;
    /// impl Stage for Increment {
    ///     type Input = i32;
    ///     type Output = i32;
    ///     type Error = Infallible;
    ///
    ///     fn call(&self, input: i32) -> Result<i32, Self::Error> {
    ///         Ok(input + 1)
    ///     }
    /// }
    ///
    /// let chain = Double.then(Increment);
    /// assert_eq!(chain.call(3).unwrap(), 7);
    /// ```
    fn then<Next>(self, next: Next) -> Bind<Self, Next>
    where
        Self: Sized,
        Next: Stage<Input = Self::Output, Error = Self::Error>,
    {
        bind(self, next)
    }

    /// Calls the stage and splits the result into an output and an optional error.
    ///
    /// On failure the output is `Self::Output::default()` and the error is
    /// returned alongside it, for callers that prefer a positional
    /// `(value, error)` pair over matching on a `Result`.
    fn call_or_default(&self, input: Self::Input) -> (Self::Output, Option<Self::Error>)
    where
        Self::Output: Default,
    {
        match self.call(input) {
            Ok(output) => (output, None),
            Err(error) => (Self::Output::default(), Some(error)),
        }
    }
}

impl<S> Stage for &S
where
    S: Stage + ?Sized,
{
    type Input = S::Input;
    type Output = S::Output;
    type Error = S::Error;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        (**self).call(input)
    }
}

impl<S> Stage for Box<S>
where
    S: Stage + ?Sized,
{
    type Input = S::Input;
    type Output = S::Output;
    type Error = S::Error;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        (**self).call(input)
    }
}
