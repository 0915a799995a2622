//! Modifier application.
//!
//! Applying a modifier never fails. When its path does not resolve on the
//! target, a condition does not hold, the operand does not resolve, or the
//! operator is unknown, the target comes back untouched.

use crate::conditions::ConditionEvaluator;
use crate::core::Value;

use super::modifier::{Modifier, Operand};

/// Applies single modifiers to targets.
pub struct ModifierApplier;

impl ModifierApplier {
    /// Check if a modifier would be considered for a target.
    ///
    /// The path must resolve to a defined value (explicit nulls count) and
    /// every condition must hold.
    #[must_use]
    pub fn is_applicable(target: &Value, modifier: &Modifier) -> bool {
        target.get(&modifier.path).is_some()
            && ConditionEvaluator::all_hold(target, &modifier.conditions)
    }

    /// Apply a modifier, returning `None` when it leaves the target untouched.
    ///
    /// References in the operand and bounds are read from `target`, the state
    /// this modifier sees, not from any earlier snapshot.
    #[must_use]
    pub fn try_apply(target: &Value, modifier: &Modifier) -> Option<Value> {
        let current = target.get(&modifier.path)?;
        if !ConditionEvaluator::all_hold(target, &modifier.conditions) {
            return None;
        }

        let result = match &modifier.operand {
            Operand::Source(source) => {
                modifier.operation.combine(current, source.resolve(target)?)?
            }
            Operand::Constrained(constrained) => {
                let base = modifier
                    .operation
                    .combine(current, constrained.value.resolve(target)?)?;
                constrained.clamp(base, target)?
            }
        };

        tracing::trace!(
            path = %modifier.path,
            operation = %modifier.operation,
            "modifier applied"
        );
        Some(target.set(&modifier.path, result))
    }

    /// Apply a modifier, handing back `target` itself when it does not apply.
    #[must_use]
    pub fn apply(target: Value, modifier: &Modifier) -> Value {
        match Self::try_apply(&target, modifier) {
            Some(next) => next,
            None => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Condition;
    use crate::core::path_ref;
    use crate::modifiers::ConstrainedValue;

    fn member() -> Value {
        Value::record()
            .with_field("skillLevel", 3)
            .with_field(
                "pokemon",
                Value::record()
                    .with_field("frequency", 2400)
                    .with_field("berry", Value::record().with_field("name", "GREPA"))
                    .with_field("skill", Value::record().with_field("maxLevel", 6)),
            )
    }

    #[test]
    fn test_multiply() {
        let result = ModifierApplier::apply(member(), &Modifier::multiply("pokemon.frequency", 0.9));
        assert_eq!(result.get(&"pokemon.frequency".into()), Some(&Value::from(2160)));
    }

    #[test]
    fn test_assign_ignores_current_value() {
        let result = ModifierApplier::apply(member(), &Modifier::assign("pokemon.berry.name", "ORAN"));
        assert_eq!(result.get(&"pokemon.berry.name".into()), Some(&Value::from("ORAN")));
    }

    #[test]
    fn test_operand_path_ref() {
        let modifier = Modifier::add("skillLevel", path_ref("pokemon.skill.maxLevel"));
        let result = ModifierApplier::apply(member(), &modifier);
        assert_eq!(result.get(&"skillLevel".into()), Some(&Value::from(9)));
    }

    #[test]
    fn test_clamped_to_path_ref_max() {
        let modifier = Modifier::add(
            "skillLevel",
            ConstrainedValue::new(10).with_max(path_ref("pokemon.skill.maxLevel")),
        );
        let result = ModifierApplier::apply(member(), &modifier);
        assert_eq!(result.get(&"skillLevel".into()), Some(&Value::from(6)));
    }

    #[test]
    fn test_unresolved_bound_is_noop() {
        let target = Value::record().with_field("skillLevel", 3);
        let modifier = Modifier::add(
            "skillLevel",
            ConstrainedValue::new(10).with_max(path_ref("pokemon.skill.maxLevel")),
        );
        assert!(ModifierApplier::try_apply(&target, &modifier).is_none());
        assert_eq!(ModifierApplier::apply(target.clone(), &modifier), target);
    }

    #[test]
    fn test_clamp_after_operation() {
        // 3 - 5 = -2, then raised to the minimum of 1
        let modifier = Modifier::subtract("skillLevel", ConstrainedValue::new(5).with_min(1));
        let result = ModifierApplier::apply(member(), &modifier);
        assert_eq!(result.get(&"skillLevel".into()), Some(&Value::from(1)));
    }

    #[test]
    fn test_missing_path_is_noop() {
        let target = member();
        let modifier = Modifier::multiply("strength.berries", 2);
        assert!(!ModifierApplier::is_applicable(&target, &modifier));
        assert!(ModifierApplier::try_apply(&target, &modifier).is_none());
        assert_eq!(ModifierApplier::apply(target.clone(), &modifier), target);
    }

    #[test]
    fn test_missing_path_with_holding_condition_is_noop() {
        let target = member();
        let modifier = Modifier::assign("strength.berries", 1)
            .with_condition(Condition::equals("pokemon.berry.name", "GREPA"));
        assert!(ModifierApplier::try_apply(&target, &modifier).is_none());
    }

    #[test]
    fn test_failing_condition_is_noop() {
        let target = member();
        let modifier = Modifier::multiply("pokemon.frequency", 0.9)
            .with_condition(Condition::equals("pokemon.berry.name", "ORAN"));
        assert!(!ModifierApplier::is_applicable(&target, &modifier));
        assert_eq!(ModifierApplier::apply(target.clone(), &modifier), target);
    }

    #[test]
    fn test_unresolved_operand_is_noop() {
        let target = member();
        let modifier = Modifier::add("skillLevel", path_ref("pokemon.skill.bonus"));
        assert!(ModifierApplier::is_applicable(&target, &modifier));
        assert!(ModifierApplier::try_apply(&target, &modifier).is_none());
    }

    #[test]
    fn test_unknown_operator_is_noop() {
        let target = member();
        let modifier = Modifier::new("skillLevel", "^", 2);
        assert_eq!(ModifierApplier::apply(target.clone(), &modifier), target);
    }

    #[test]
    fn test_null_value_is_applicable() {
        let target = Value::record().with_field("bonus", Value::Null);
        let result = ModifierApplier::apply(target, &Modifier::add("bonus", 5));
        assert_eq!(result.get(&"bonus".into()), Some(&Value::from(5)));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let target = member();
        let _ = ModifierApplier::try_apply(&target, &Modifier::assign("skillLevel", 1));
        assert_eq!(target.get(&"skillLevel".into()), Some(&Value::from(3)));
    }
}
