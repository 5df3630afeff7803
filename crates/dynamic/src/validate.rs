use crate::{ConstructionError, Entry, ErasedStage, TypeDesc};

/// Checks that `entries` form a composable chain.
///
/// The checks run in a fixed order, each over the whole chain, and the first
/// violation found is returned:
///
/// 1. The chain is not empty.
/// 2. Every entry is a stage.
/// 3. Every stage declares at least one output.
/// 4. Every stage's last output is the error type.
/// 5. Each stage produces as many values as the next one takes.
/// 6. Each produced value has the type the next stage expects at that position.
///
/// On success, returns the stages in chain order.
///
/// # Errors
///
/// Returns the [`ConstructionError`] describing the first failed check.
pub fn validate(entries: &[Entry]) -> Result<Vec<ErasedStage>, ConstructionError> {
    if entries.is_empty() {
        return Err(ConstructionError::Empty);
    }

    let stages = entries
        .iter()
        .enumerate()
        .map(|(position, entry)| match entry {
            Entry::Stage(stage) => Ok(stage.clone()),
            Entry::Value(constant) => Err(ConstructionError::NotInvocable {
                position,
                found: constant.type_desc(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (position, stage) in stages.iter().enumerate() {
        if stage.signature().outputs().is_empty() {
            return Err(ConstructionError::NoOutputs {
                position,
                stage: stage.name().to_string(),
            });
        }
    }

    for (position, stage) in stages.iter().enumerate() {
        let last = stage.signature().outputs().last();
        if let Some(&found) = last.filter(|desc| !desc.is_error()) {
            return Err(ConstructionError::MissingErrorSlot {
                position,
                stage: stage.name().to_string(),
                found,
                expected: TypeDesc::error(),
            });
        }
    }

    for (position, pair) in stages.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let produced = from.signature().values().len();
        let expected = to.signature().inputs().len();
        if produced != expected {
            return Err(ConstructionError::ArityMismatch {
                position,
                from: from.name().to_string(),
                to: to.name().to_string(),
                produced,
                expected,
            });
        }
    }

    for (position, pair) in stages.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let outputs = from.signature().values();
        let inputs = to.signature().inputs();
        if let Some((index, (&output, &input))) = outputs
            .iter()
            .zip(inputs)
            .enumerate()
            .find(|(_, (output, input))| output != input)
        {
            return Err(ConstructionError::TypeMismatch {
                position,
                index,
                from: from.name().to_string(),
                to: to.name().to_string(),
                output,
                input,
            });
        }
    }

    Ok(stages)
}
