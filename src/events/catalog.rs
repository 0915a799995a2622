//! Event catalog.
//!
//! The catalog is the calendar of live events. Declaration modules register
//! their compiled events at startup (or the whole calendar is loaded from a
//! JSON file), and simulators ask for whatever is live at a given instant.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;

use crate::core::{EngineConfig, EngineError, Value};

use super::event::{Event, EventDefinition};

/// Registry of events, keyed by name, in registration order.
#[derive(Clone, Debug, Default)]
pub struct EventCatalog {
    /// All registered events.
    events: Vec<Event>,

    /// Index by name for fast lookup.
    by_name: FxHashMap<String, usize>,
}

impl EventCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from events, rejecting duplicate names.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Result<Self, EngineError> {
        let mut catalog = Self::new();
        for event in events {
            catalog.register(event)?;
        }
        Ok(catalog)
    }

    /// Load a JSON array of event definitions.
    ///
    /// Each definition is validated like a compiled event: name, description,
    /// date window, and operators according to `config`.
    pub fn from_json(json: &str, config: &EngineConfig) -> Result<Self, EngineError> {
        let definitions: Vec<EventDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for definition in definitions {
            let event = Event::try_from(definition)?;
            event.validate(config)?;
            event.warn_unknown_operators();
            catalog.register(event)?;
        }
        tracing::debug!(events = catalog.len(), "loaded event catalog");
        Ok(catalog)
    }

    /// Register an event.
    pub fn register(&mut self, event: Event) -> Result<(), EngineError> {
        if self.by_name.contains_key(event.name()) {
            return Err(EngineError::DuplicateEvent(event.name().to_string()));
        }
        tracing::debug!(event = event.name(), "registered event");
        self.by_name.insert(event.name().to_string(), self.events.len());
        self.events.push(event);
        Ok(())
    }

    /// Get an event by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Event> {
        self.by_name.get(name).map(|&index| &self.events[index])
    }

    /// Check if an event is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over events in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Events live at `at`, in registration order.
    pub fn active_at(&self, at: DateTime<Utc>) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |event| event.is_active_at(at))
    }

    /// Apply every event live at `at`, in registration order.
    #[must_use]
    pub fn apply_active(&self, target: &Value, at: DateTime<Utc>) -> Value {
        self.active_at(at)
            .fold(target.clone(), |current, event| event.apply(&current))
    }
}

impl<'a> IntoIterator for &'a EventCatalog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
