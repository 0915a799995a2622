//! Startup path audit.
//!
//! Event paths are plain strings, so a typo only shows up as a modifier that
//! silently never applies. The audit checks every path an event reads or
//! writes against representative sample targets (one per target shape) when
//! the calendar is loaded, long before a simulation runs.

use serde::Serialize;

use crate::core::{EngineError, Value};

use super::event::Event;

/// Checks event paths against sample targets.
#[derive(Clone, Debug, Default)]
pub struct PathAudit {
    samples: Vec<Value>,
}

impl PathAudit {
    /// Create an audit over sample targets.
    pub fn new(samples: impl IntoIterator<Item = Value>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// Add a typed sample target.
    pub fn with_typed_sample<T: Serialize>(mut self, sample: &T) -> Result<Self, EngineError> {
        self.samples.push(Value::from_typed(sample)?);
        Ok(self)
    }

    /// Number of samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Check one event.
    ///
    /// Every modifier path, operand and bound reference, and condition path
    /// (text `leftValue`s included) must resolve on at least one sample. Wildcard paths are rejected
    /// outright since they never resolve.
    pub fn check(&self, event: &Event) -> Result<(), EngineError> {
        for path in event.modifiers().iter().flat_map(|m| m.paths()) {
            if path.has_wildcard() {
                return Err(EngineError::WildcardPath {
                    event: event.name().to_string(),
                    path: path.to_string(),
                });
            }
            if !self.samples.iter().any(|sample| sample.get(&path).is_some()) {
                return Err(EngineError::UnresolvedPath {
                    event: event.name().to_string(),
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check several events, stopping at the first failure.
    pub fn check_all<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> Result<(), EngineError> {
        events.into_iter().try_for_each(|event| self.check(event))
    }
}
