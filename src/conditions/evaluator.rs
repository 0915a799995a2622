//! Condition evaluation.
//!
//! Missing values ("undefined") take part in comparisons the way an absent
//! field would: they equal only another missing value, never order against
//! anything, and are never an item of a list.

use crate::core::{Path, Value};

use super::condition::{ComparisonOp, Condition};

/// Evaluator for modifier conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition holds for a target.
    #[must_use]
    pub fn evaluate(target: &Value, condition: &Condition) -> bool {
        match condition {
            Condition::Target {
                left_value_path,
                operation,
                right_value,
            } => Self::compare(
                target.get(left_value_path),
                operation,
                right_value.resolve(target),
            ),

            Condition::External {
                left_value,
                operation,
                right_value,
            } => {
                let left = match left_value {
                    Value::Text(path) => target.get(&Path::parse(path.as_str())),
                    literal => Some(literal),
                };
                Self::compare(left, operation, Some(right_value))
            }
        }
    }

    /// Check if every condition holds. An empty list always holds.
    #[must_use]
    pub fn all_hold(target: &Value, conditions: &[Condition]) -> bool {
        conditions.iter().all(|c| Self::evaluate(target, c))
    }

    /// Apply an operator to two possibly-missing values.
    #[must_use]
    pub fn compare(left: Option<&Value>, operation: &ComparisonOp, right: Option<&Value>) -> bool {
        match operation {
            ComparisonOp::Eq => left == right,
            ComparisonOp::Ne => left != right,
            ComparisonOp::Gt => Self::ordered(left, right, |l, r| l > r),
            ComparisonOp::Lt => Self::ordered(left, right, |l, r| l < r),
            ComparisonOp::Ge => Self::ordered(left, right, |l, r| l >= r),
            ComparisonOp::Le => Self::ordered(left, right, |l, r| l <= r),
            ComparisonOp::In => Self::membership(left, right).unwrap_or(false),
            ComparisonOp::NotIn => Self::membership(left, right).is_some_and(|found| !found),
            ComparisonOp::Unknown(_) => false,
        }
    }

    fn ordered(left: Option<&Value>, right: Option<&Value>, cmp: impl Fn(f64, f64) -> bool) -> bool {
        match (left, right) {
            (Some(l), Some(r)) => cmp(l.to_number(), r.to_number()),
            _ => false,
        }
    }

    /// `None` when the right side is not a list.
    fn membership(left: Option<&Value>, right: Option<&Value>) -> Option<bool> {
        let items = right?.as_list()?;
        Some(left.is_some_and(|l| items.iter().any(|item| item == l)))
    }
}
