//! Conditions gating modifiers.
//!
//! A modifier only applies when every one of its conditions holds. The
//! engine supports two kinds of condition:
//!
//! - [`Condition::Target`]: compares a value read from the target by path
//! - [`Condition::External`]: compares literals the caller baked into the
//!   event (island id, season flag, a rolled bucket). Text on the left is a
//!   path, read from the target.
//!
//! Ordering operators coerce both sides to numbers; `=` and `!=` are strict;
//! `in` and `not-in` need a list on the right.

mod condition;
mod evaluator;

pub use condition::{ComparisonOp, Condition};
pub use evaluator::ConditionEvaluator;
