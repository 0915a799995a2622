//! Applying modifier lists.
//!
//! There is no registry of target kinds. A modifier applies to whatever
//! target its path resolves on, so one list can be folded over Pokémon,
//! team members and strength totals alike.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{EngineError, Value};

use super::applier::ModifierApplier;
use super::modifier::Modifier;

/// Fold modifiers over a target in order.
///
/// Each modifier sees the output of the one before it. Modifiers that do not
/// apply are skipped.
#[must_use]
pub fn apply_modifiers(target: &Value, modifiers: &[Modifier]) -> Value {
    modifiers.iter().fold(target.clone(), ModifierApplier::apply)
}

/// Fold modifiers over a typed snapshot.
///
/// Converts through [`Value`]; only conversion can fail.
pub fn apply_modifiers_typed<T>(target: &T, modifiers: &[Modifier]) -> Result<T, EngineError>
where
    T: Serialize + DeserializeOwned,
{
    let value = Value::from_typed(target)?;
    apply_modifiers(&value, modifiers).to_typed()
}
