//! A mock packing line for banana boxes, used for integration tests.

use serde::{Deserialize, Serialize};
use serde_json::Map;
use splice_core::{Stage, bind, from_fn};
use splice_dynamic::{ErasedStage, Registry};
use thiserror::Error;

/// The most bananas a single box can hold.
pub const MAX_BANANA_COUNT: i64 = 90;

/// A box of bananas, as exchanged in JSON.
///
/// Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BananaBox {
    pub r#type: String,
    pub bananas: i64,
}

#[derive(Debug, Error)]
pub enum BananaError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(
        "Tried to add {added} bananas to a box with {inside} bananas already inside it, will go over the limit"
    )]
    OverLimit { added: i64, inside: i64 },
}

impl BananaBox {
    /// Returns a box with twice as many bananas.
    ///
    /// # Errors
    ///
    /// Fails if the doubled count would exceed [`MAX_BANANA_COUNT`].
    pub fn double(self) -> Result<Self, BananaError> {
        let count = self.bananas;
        self.add_bananas(count)
    }

    /// Returns a box with `count` more bananas.
    ///
    /// # Errors
    ///
    /// Fails if the new count would exceed [`MAX_BANANA_COUNT`].
    pub fn add_bananas(mut self, count: i64) -> Result<Self, BananaError> {
        let Some(total) = count
            .checked_add(self.bananas)
            .filter(|total| *total <= MAX_BANANA_COUNT)
        else {
            return Err(BananaError::OverLimit {
                added: count,
                inside: self.bananas,
            });
        };
        self.bananas = total;
        Ok(self)
    }
}

/// Reads a box from JSON.
///
/// # Errors
///
/// Fails if `bytes` are not a JSON object describing a box.
pub fn parse(bytes: Vec<u8>) -> Result<BananaBox, BananaError> {
    // Only objects are boxes; with defaulted fields serde would also accept `[]`.
    let object: Map<String, serde_json::Value> = serde_json::from_slice(&bytes)?;
    Ok(serde_json::from_value(serde_json::Value::Object(object))?)
}

/// Writes a box as JSON.
///
/// # Errors
///
/// Fails if the box cannot be serialized.
pub fn encode(banana_box: BananaBox) -> Result<Vec<u8>, BananaError> {
    Ok(serde_json::to_vec(&banana_box)?)
}

/// JSON in, JSON out, with the banana count doubled.
pub fn double_banana_box()
-> impl Stage<Input = Vec<u8>, Output = Vec<u8>, Error = BananaError> + Clone + Send + Sync {
    bind!(from_fn(parse), from_fn(BananaBox::double), from_fn(encode))
}

/// JSON in, JSON out, with the banana count doubled twice.
pub fn quadruple_banana_box()
-> impl Stage<Input = Vec<u8>, Output = Vec<u8>, Error = BananaError> + Clone + Send + Sync {
    bind!(
        from_fn(parse),
        from_fn(BananaBox::double),
        from_fn(BananaBox::double),
        from_fn(encode),
    )
}

/// A registry holding the banana stages under the names `parse`, `double`
/// and `encode`, plus the value `max` which is not a stage.
#[must_use]
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register_stage(ErasedStage::unary("parse", parse))
        .register_stage(ErasedStage::unary("double", BananaBox::double))
        .register_stage(ErasedStage::unary("encode", encode))
        .register_value("max", MAX_BANANA_COUNT);
    registry
}
