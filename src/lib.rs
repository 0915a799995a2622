//! # live-events
//!
//! A path-based modifier and live-event rule engine for game companion
//! calculators.
//!
//! ## Design Principles
//!
//! 1. **Events Are Data**: A live event is a named bundle of modifiers, not a
//!    branch in the simulation code. Adding an event never touches a
//!    simulator.
//!
//! 2. **Shape-Agnostic**: The engine knows nothing about Pokémon, members or
//!    strength. Targets are [`Value`] trees addressed by dotted [`Path`]s;
//!    callers keep their own typed snapshots and cross the boundary through
//!    the serde adapters.
//!
//! 3. **Never Mutate**: Applying a modifier returns a new target. Untouched
//!    subtrees are shared with the input via `im-rs` persistent collections.
//!
//! ## Architecture
//!
//! - **Apply-time references**: a [`PathRef`] in an operand or bound reads
//!   the target as it stands when that modifier runs, so later modifiers see
//!   the effects of earlier ones.
//!
//! - **Silent mismatches**: a modifier whose path or operand does not resolve
//!   is skipped. Problems are reported once, when events are built or loaded.
//!
//! ## Modules
//!
//! - `core`: values, paths, typed adapters, errors, configuration
//! - `conditions`: target-relative and external conditions
//! - `modifiers`: modifiers, the applier and the dispatch facade
//! - `events`: events, builders, factories, the catalog and the path audit
//!
//! ## Example
//!
//! ```
//! use live_events::{Event, Modifier, Value};
//!
//! let event = Event::builder()
//!     .name("Halloween")
//!     .description("Faster helping during the Halloween event")
//!     .modifier(Modifier::multiply("frequency", 0.9))
//!     .compile()
//!     .unwrap();
//!
//! let pikachu = Value::record().with_field("frequency", 2400);
//! let boosted = event.apply(&pikachu);
//! assert_eq!(boosted.get(&"frequency".into()), Some(&Value::from(2160)));
//! ```

pub mod core;
pub mod conditions;
pub mod modifiers;
pub mod events;

// Re-export commonly used types
pub use crate::core::{
    path_ref, EngineConfig, EngineError, OperatorPolicy, Path, PathRef, Segment, Value,
    ValueSource,
};

pub use crate::conditions::{ComparisonOp, Condition, ConditionEvaluator};

pub use crate::modifiers::{
    apply_modifiers, apply_modifiers_typed, ArithmeticOp, ConstrainedValue, Modifier,
    ModifierApplier, Operand, TargetKind,
};

pub use crate::events::{Event, EventBuilder, EventCatalog, EventFactory, PathAudit};
