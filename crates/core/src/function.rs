use std::{any::type_name, fmt, marker::PhantomData};

use crate::Stage;

/// Adapts a function or closure into a [`Stage`].
///
/// Any `Fn(I) -> Result<O, E>` qualifies, where `E` is a thread-safe error
/// type. Functions of several arguments can be adapted by taking a tuple.
///
/// ```
/// use splice_core::{Stage, from_fn};
///
/// let parse = from_fn(|text: &'static str| text.parse::<u8>());
///
/// assert_eq!(parse.call("42"), Ok(42));
/// assert!(parse.call("four").is_err());
/// ```
pub const fn from_fn<F, I, O, E>(function: F) -> FnStage<F, I>
where
    F: Fn(I) -> Result<O, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    FnStage {
        function,
        _marker: PhantomData,
    }
}

/// A stage backed by a function.
///
/// Created by [`from_fn`].
pub struct FnStage<F, I> {
    function: F,
    _marker: PhantomData<fn(I)>,
}

impl<F, I, O, E> Stage for FnStage<F, I>
where
    F: Fn(I) -> Result<O, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Input = I;
    type Output = O;
    type Error = E;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        (self.function)(input)
    }
}

impl<F: Clone, I> Clone for FnStage<F, I> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<F: Copy, I> Copy for FnStage<F, I> {}

impl<F, I> fmt::Debug for FnStage<F, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStage")
            .field("function", &type_name::<F>())
            .finish()
    }
}
