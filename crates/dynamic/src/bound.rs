use std::{any::type_name, fmt, marker::PhantomData, sync::Arc};

use tracing::debug;

use crate::{
    BoxError, ConstructionError, ContractViolation, Entry, ErasedStage, Params, Signature, Value,
    executor, validate,
};

/// Validates `entries` and composes them into a single callable.
///
/// The entries are checked with [`validate`] before anything is returned, so
/// a malformed chain never yields a [`Bound`]. The result takes the inputs of
/// the first stage and returns the outputs of the last one.
///
/// ```
/// use splice_dynamic::{ConstructionError, ErasedStage, bind};
///
/// let parse = ErasedStage::unary("parse", |text: String| text.parse::<u8>());
/// let negate = ErasedStage::unary("negate", |n: i8| Ok::<_, std::fmt::Error>(-n));
///
/// let error = bind([parse, negate]).unwrap_err();
/// assert!(matches!(error, ConstructionError::TypeMismatch { position: 0, index: 0, .. }));
/// ```
///
/// # Errors
///
/// Returns a [`ConstructionError`] if the entries do not form a composable
/// chain.
pub fn bind<I>(entries: I) -> Result<Bound, ConstructionError>
where
    I: IntoIterator,
    I::Item: Into<Entry>,
{
    let entries: Vec<Entry> = entries.into_iter().map(Into::into).collect();

    let stages = validate(&entries).inspect_err(|error| {
        debug!(entries = entries.len(), %error, "rejected chain");
    })?;

    // `validate` rejects empty chains.
    let (first, last) = (&stages[0], &stages[stages.len() - 1]);
    let signature = Signature::new(
        first.signature().inputs().to_vec(),
        last.signature().outputs().to_vec(),
    );

    debug!(stages = stages.len(), %signature, "bound chain");

    Ok(Bound {
        stages: stages.into(),
        signature,
    })
}

/// A validated chain of erased stages, callable as one stage.
///
/// A `Bound` holds no state besides its stages. Every call runs the chain
/// from the first stage, and clones share the same stages.
#[derive(Clone)]
pub struct Bound {
    stages: Arc<[ErasedStage]>,
    signature: Signature,
}

impl Bound {
    /// Returns the signature of the composed chain.
    ///
    /// Its inputs are those of the first stage and its outputs those of the
    /// last.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Returns the stages in the order they run.
    #[must_use]
    pub fn stages(&self) -> &[ErasedStage] {
        &self.stages
    }

    /// Runs the chain with boxed inputs.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage unchanged. Inputs that do
    /// not match [`Self::signature`] fail with a [`ContractViolation`].
    pub fn call(&self, inputs: Vec<Value>) -> Result<Vec<Value>, BoxError> {
        executor::run(&self.stages, inputs)
    }

    /// Returns a statically typed view of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::SignatureMismatch`] if the chain does not
    /// take `I` and return `O`.
    pub fn typed<I: Params, O: Params>(&self) -> Result<TypedBound<I, O>, ConstructionError> {
        let expected = Signature::of::<I, O>();
        if expected != self.signature {
            return Err(ConstructionError::SignatureMismatch {
                expected,
                found: self.signature.clone(),
            });
        }

        Ok(TypedBound {
            bound: self.clone(),
            _marker: PhantomData,
        })
    }

    /// Turns the chain into a stage, so it can be part of a longer chain.
    #[must_use]
    pub fn into_stage(self, name: impl Into<String>) -> ErasedStage {
        let signature = self.signature.clone();
        ErasedStage::from_raw(name, signature, move |inputs| self.call(inputs))
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("signature", &self.signature)
            .field(
                "stages",
                &self.stages.iter().map(ErasedStage::name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A [`Bound`] chain known to take `I` and return `O`.
///
/// Created by [`Bound::typed`].
pub struct TypedBound<I, O> {
    bound: Bound,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I: Params, O: Params> TypedBound<I, O> {
    /// Runs the chain.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage unchanged.
    pub fn call(&self, input: I) -> Result<O, BoxError> {
        let outputs = self.bound.call(input.into_values())?;
        let output = O::from_values(outputs).ok_or(ContractViolation::Unpack {
            expected: type_name::<O>(),
        })?;
        Ok(output)
    }

    /// Returns the untyped chain.
    #[must_use]
    pub fn bound(&self) -> &Bound {
        &self.bound
    }
}

impl<I, O> Clone for TypedBound<I, O> {
    fn clone(&self) -> Self {
        Self {
            bound: self.bound.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I, O> fmt::Debug for TypedBound<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedBound").field(&self.bound).finish()
    }
}
