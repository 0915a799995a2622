//! Live events.
//!
//! - [`Event`]: a named, immutable bundle of modifiers with an optional
//!   live window
//! - [`EventBuilder`]: fluent declaration of events, plain or parameterized
//! - [`EventFactory`]: produces a fresh event per input
//! - [`EventCatalog`]: the calendar of registered events
//! - [`PathAudit`]: startup check of event paths against sample targets
//!
//! ## Design Philosophy
//!
//! Live events are data, not simulation branches. Each in-game event gets
//! one declaration; simulators apply whatever is live to their snapshots
//! and stay unaware of which events exist.

mod event;
mod builder;
mod catalog;
mod audit;

pub use event::Event;
pub use builder::{EventBuilder, EventFactory};
pub use catalog::EventCatalog;
pub use audit::PathAudit;
