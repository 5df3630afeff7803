use std::{
    any::{Any, TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

/// A type-erased value passed between stages.
pub type Value = Box<dyn Any + Send>;

/// The error type every erased stage reports failures with.
///
/// This is the error-indicator type: the last declared output of a stage must
/// be `BoxError`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Describes a type at runtime.
///
/// Two descriptors are equal when they describe the same type. The name is
/// only used in diagnostics.
#[derive(Clone, Copy)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    /// Returns the descriptor of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the descriptor of the error-indicator type, [`BoxError`].
    #[must_use]
    pub fn error() -> Self {
        Self::of::<BoxError>()
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        *self == Self::error()
    }

    /// Returns `true` if `value` holds a `T` described by this descriptor.
    #[must_use]
    pub fn describes(&self, value: &Value) -> bool {
        (**value).type_id() == self.id
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_follows_the_type() {
        assert_eq!(TypeDesc::of::<u8>(), TypeDesc::of::<u8>());
        assert_ne!(TypeDesc::of::<u8>(), TypeDesc::of::<i8>());
        assert_eq!(TypeDesc::of::<String>().name(), "alloc::string::String");
    }

    #[test]
    fn error_descriptor() {
        assert!(TypeDesc::error().is_error());
        assert!(!TypeDesc::of::<std::io::Error>().is_error());
    }

    #[test]
    fn describes_boxed_values() {
        let value: Value = Box::new(7_u32);
        assert!(TypeDesc::of::<u32>().describes(&value));
        assert!(!TypeDesc::of::<Value>().describes(&value));
    }
}
