/// Composes one or more stages, left to right, into a single [`Stage`](crate::Stage).
///
/// `bind!(a, b, c)` expands to `bind(bind(a, b), c)`: the input of the result
/// is that of `a`, its output and error are those of `c`, and a failure in any
/// stage skips every stage after it. `bind!(a)` is just `a`.
///
/// ```
/// use splice_core::{Stage, bind, from_fn};
///
/// let parse = from_fn(|text: String| text.parse::<i32>());
/// let halve = from_fn(|n: i32| if n % 2 == 0 { Ok(n / 2) } else { "odd".parse::<i32>() });
/// let render = from_fn(|n: i32| Ok::<_, std::num::ParseIntError>(format!("<{n}>")));
///
/// let pipeline = bind!(parse, halve, render);
///
/// assert_eq!(pipeline.call("84".into()), Ok("<42>".to_string()));
/// assert!(pipeline.call("7".into()).is_err());
/// ```
#[macro_export]
macro_rules! bind {
    ($stage:expr $(,)?) => {
        $stage
    };
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {
        $crate::bind!($crate::bind($first, $second) $(, $rest)*)
    };
}

#[cfg(test)]
mod tests {
    use thiserror::Error;

    use crate::{Stage, from_fn};

    #[derive(Debug, Error, PartialEq)]
    #[error("{0} is out of range")]
    struct OutOfRange(u32);

    fn below(limit: u32) -> impl Fn(u32) -> Result<u32, OutOfRange> + Copy {
        move |n| if n < limit { Ok(n + 1) } else { Err(OutOfRange(n)) }
    }

    #[test]
    fn single_stage_is_unchanged() {
        let stage = bind!(from_fn(below(5)));
        assert_eq!(stage.call(1), Ok(2));
    }

    #[test]
    fn folds_left_to_right() {
        let chain = bind!(
            from_fn(below(10)),
            from_fn(below(10)),
            from_fn(below(3)),
            from_fn(below(10)),
        );

        assert_eq!(chain.call(0), Ok(4));
        assert_eq!(chain.call(1), Err(OutOfRange(3)));
    }

    #[test]
    fn macro_and_nested_calls_agree() {
        let stage = from_fn(below(6));
        let by_macro = bind!(stage, stage, stage);
        let by_hand = crate::bind(stage, crate::bind(stage, stage));

        for n in 0..10 {
            assert_eq!(by_macro.call(n), by_hand.call(n));
        }
    }
}
