//! Modifier system.
//!
//! - `Modifier`: one conditional arithmetic step on a path
//! - `ModifierApplier`: applies a single modifier
//! - `apply_modifiers`: folds a list of modifiers over a target
//!
//! ## Design Philosophy
//!
//! Modifiers are duck-typed. A modifier written for team members simply
//! doesn't apply to a strength snapshot, because its path doesn't resolve
//! there. Adding a new target shape needs no engine changes, only events
//! whose paths resolve on it.

mod modifier;
mod applier;
mod dispatch;

pub use modifier::{ArithmeticOp, ConstrainedValue, Modifier, Operand, TargetKind};
pub use applier::ModifierApplier;
pub use dispatch::{apply_modifiers, apply_modifiers_typed};
