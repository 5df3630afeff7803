use std::any::Any;

use crate::{TypeDesc, Value};

/// A typed group of values that can cross an erased stage boundary.
///
/// Implemented for tuples of up to four `Send + 'static` elements. The empty
/// tuple stands for "no values".
pub trait Params: Sized + 'static {
    /// Returns the descriptor of each element, in order.
    fn types() -> Vec<TypeDesc>;

    /// Boxes each element, in order.
    fn into_values(self) -> Vec<Value>;

    /// Unboxes `values` into `Self`.
    ///
    /// Returns `None` if the count or any element type does not match.
    fn from_values(values: Vec<Value>) -> Option<Self>;
}

macro_rules! impl_params {
    ($($name:ident),*) => {
        impl<$($name: Any + Send),*> Params for ($($name,)*) {
            fn types() -> Vec<TypeDesc> {
                vec![$(TypeDesc::of::<$name>()),*]
            }

            #[allow(non_snake_case)]
            fn into_values(self) -> Vec<Value> {
                let ($($name,)*) = self;
                vec![$(Box::new($name) as Value),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn from_values(values: Vec<Value>) -> Option<Self> {
                if values.len() != Self::types().len() {
                    return None;
                }
                let mut values = values.into_iter();
                $(let $name = *values.next()?.downcast::<$name>().ok()?;)*
                Some(($($name,)*))
            }
        }
    };
}

impl_params!();
impl_params!(A);
impl_params!(A, B);
impl_params!(A, B, C);
impl_params!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_matching_values() {
        let values = (3_u8, "three".to_string()).into_values();
        assert_eq!(
            <(u8, String)>::from_values(values),
            Some((3, "three".to_string()))
        );
    }

    #[test]
    fn rejects_wrong_types_and_counts() {
        assert_eq!(<(u8,)>::from_values((3_i32,).into_values()), None);
        assert_eq!(<(u8,)>::from_values((1_u8, 2_u8).into_values()), None);
        assert_eq!(<(u8, u8)>::from_values((1_u8,).into_values()), None);
    }

    #[test]
    fn empty_tuple_has_no_values() {
        assert!(<()>::types().is_empty());
        assert!(().into_values().is_empty());
        assert_eq!(<()>::from_values(Vec::new()), Some(()));
    }
}
