use std::{any::type_name, fmt, sync::Arc};

use splice_core::Stage;

use crate::{BoxError, ContractViolation, Params, Side, Signature, TypeDesc, Value};

type Body = dyn Fn(Vec<Value>) -> Result<Vec<Value>, BoxError> + Send + Sync;

/// A named stage whose types are checked at runtime.
///
/// An `ErasedStage` pairs a body operating on boxed [`Value`]s with the
/// [`Signature`] it promises to honor. Cloning is cheap; clones share the
/// same body.
#[derive(Clone)]
pub struct ErasedStage {
    name: Arc<str>,
    signature: Signature,
    body: Arc<Body>,
}

impl ErasedStage {
    /// Creates a stage from a function of one argument with one result.
    ///
    /// ```
    /// use splice_dynamic::{ErasedStage, TypeDesc};
    ///
    /// let stage = ErasedStage::unary("len", |text: String| Ok::<_, std::fmt::Error>(text.len()));
    ///
    /// assert_eq!(stage.signature().inputs(), [TypeDesc::of::<String>()]);
    /// assert_eq!(stage.signature().values(), [TypeDesc::of::<usize>()]);
    /// ```
    pub fn unary<F, I, O, E>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
        I: Send + 'static,
        O: Send + 'static,
        E: Into<BoxError>,
    {
        Self::new(name, move |(input,): (I,)| function(input).map(|output| (output,)))
    }

    /// Creates a stage from a function taking and returning tuples.
    ///
    /// Each tuple element becomes one input or output position.
    pub fn new<F, I, O, E>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
        I: Params,
        O: Params,
        E: Into<BoxError>,
    {
        let body = move |values: Vec<Value>| -> Result<Vec<Value>, BoxError> {
            let input = I::from_values(values).ok_or(ContractViolation::Unpack {
                expected: type_name::<I>(),
            })?;
            function(input).map(O::into_values).map_err(Into::into)
        };

        Self {
            name: name.into().into(),
            signature: Signature::of::<I, O>(),
            body: Arc::new(body),
        }
    }

    /// Adapts a statically typed [`Stage`] into an erased one.
    pub fn from_stage<S>(name: impl Into<String>, stage: S) -> Self
    where
        S: Stage + Send + Sync + 'static,
        S::Input: Send + 'static,
        S::Output: Send + 'static,
    {
        Self::unary(name, move |input: S::Input| stage.call(input))
    }

    /// Creates a stage from a hand-declared signature and a raw body.
    ///
    /// The signature is not checked here; [`bind`](crate::bind) rejects it
    /// if it is not composable. The body receives values matching
    /// `signature.inputs()` and must return values matching
    /// `signature.values()`, otherwise calls fail with a
    /// [`ContractViolation`].
    pub fn from_raw<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Vec<Value>, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into().into(),
            signature,
            body: Arc::new(body),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Calls the stage with boxed inputs.
    ///
    /// # Errors
    ///
    /// Returns the body's error unchanged if it fails, or a
    /// [`ContractViolation`] if the inputs or the produced outputs do not
    /// match the signature.
    pub fn invoke(&self, inputs: Vec<Value>) -> Result<Vec<Value>, BoxError> {
        self.check(Side::Input, self.signature.inputs(), &inputs)?;
        let outputs = (self.body)(inputs)?;
        self.check(Side::Output, self.signature.values(), &outputs)?;
        Ok(outputs)
    }

    fn check(
        &self,
        side: Side,
        expected: &[TypeDesc],
        values: &[Value],
    ) -> Result<(), ContractViolation> {
        if expected.len() != values.len() {
            return Err(ContractViolation::Count {
                stage: self.name.to_string(),
                side,
                expected: expected.len(),
                found: values.len(),
            });
        }

        match expected
            .iter()
            .zip(values)
            .position(|(desc, value)| !desc.describes(value))
        {
            Some(index) => Err(ContractViolation::Type {
                stage: self.name.to_string(),
                side,
                index,
                expected: expected[index],
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ErasedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedStage")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
