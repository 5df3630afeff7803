use std::{any::Any, fmt, sync::Arc};

use crate::{ErasedStage, TypeDesc};

/// One element of a candidate chain.
///
/// Chains are validated from entries rather than stages so that lists
/// assembled at runtime, for example from a [`Registry`](crate::Registry),
/// can be rejected with a precise error when they name something that is not
/// callable.
#[derive(Clone)]
pub enum Entry {
    Stage(ErasedStage),
    Value(Constant),
}

impl Entry {
    /// Creates a non-callable entry holding `value`.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Entry::Value(Constant {
            desc: TypeDesc::of::<T>(),
            value: Arc::new(value),
        })
    }

    /// Returns the stage if this entry is one.
    #[must_use]
    pub fn as_stage(&self) -> Option<&ErasedStage> {
        match self {
            Entry::Stage(stage) => Some(stage),
            Entry::Value(_) => None,
        }
    }
}

impl From<ErasedStage> for Entry {
    fn from(stage: ErasedStage) -> Self {
        Entry::Stage(stage)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Stage(stage) => fmt::Debug::fmt(stage, f),
            Entry::Value(constant) => fmt::Debug::fmt(constant, f),
        }
    }
}

/// A shared, immutable value stored in an [`Entry`].
#[derive(Clone)]
pub struct Constant {
    desc: TypeDesc,
    value: Arc<dyn Any + Send + Sync>,
}

impl Constant {
    /// Returns the type of the stored value.
    #[must_use]
    pub fn type_desc(&self) -> TypeDesc {
        self.desc
    }

    /// Returns the stored value if it is a `T`.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl fmt::Debug for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constant").field("type", &self.desc).finish()
    }
}
