use tracing::{debug, trace};

use crate::{BoxError, ErasedStage, Value};

/// Threads `input` through `stages`, stopping at the first failure.
///
/// Each stage receives the values produced by the one before it. The error of
/// a failing stage is returned as is and no later stage is called.
pub(crate) fn run(stages: &[ErasedStage], input: Vec<Value>) -> Result<Vec<Value>, BoxError> {
    let mut current = input;

    for (position, stage) in stages.iter().enumerate() {
        trace!(stage = stage.name(), position, "calling stage");

        current = stage.invoke(current).inspect_err(|error| {
            debug!(
                stage = stage.name(),
                position,
                skipped = stages.len() - position - 1,
                %error,
                "stage failed, short-circuiting chain",
            );
        })?;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::Params;

    fn counter(name: &'static str, calls: &Arc<Mutex<Vec<&'static str>>>, limit: u32) -> ErasedStage {
        let calls = Arc::clone(calls);
        ErasedStage::unary(name, move |n: u32| {
            calls.lock().unwrap().push(name);
            if n >= limit {
                Err(format!("{name}: {n} reached {limit}"))
            } else {
                Ok(n + 1)
            }
        })
    }

    #[test]
    fn runs_every_stage_on_success() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let stages = [
            counter("a", &calls, 100),
            counter("b", &calls, 100),
            counter("c", &calls, 100),
        ];

        let output = run(&stages, (1_u32,).into_values()).unwrap();

        assert_eq!(<(u32,)>::from_values(output), Some((4,)));
        assert_eq!(*calls.lock().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn stops_at_the_first_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let stages = [
            counter("a", &calls, 100),
            counter("b", &calls, 2),
            counter("c", &calls, 0),
        ];

        let error = run(&stages, (1_u32,).into_values()).unwrap_err();

        assert_eq!(error.to_string(), "b: 2 reached 2");
        assert_eq!(*calls.lock().unwrap(), ["a", "b"]);
    }

    #[test]
    fn a_failing_first_stage_stops_everything() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let stages = [counter("a", &calls, 0), counter("b", &calls, 100)];

        assert!(run(&stages, (0_u32,).into_values()).is_err());
        assert_eq!(*calls.lock().unwrap(), ["a"]);
    }
}
