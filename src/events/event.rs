//! Event definitions.
//!
//! An event is a named, described, ordered bundle of modifiers standing for
//! one live or seasonal effect in the game ("Grepa berry week", "Greengrass
//! Isle expansion"). Events are immutable once built; the only way to get
//! one is the [`EventBuilder`](super::EventBuilder), a factory, or
//! deserializing a definition (directly or through the
//! [`EventCatalog`](super::EventCatalog)). Deserialized definitions are
//! validated like compiled ones.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, Value};
use crate::modifiers::{apply_modifiers, apply_modifiers_typed, Modifier};

use super::builder::EventBuilder;

/// A named bundle of modifiers, optionally limited to a date window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EventDefinition")]
pub struct Event {
    name: String,
    description: String,
    #[serde(default)]
    modifiers: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<DateTime<Utc>>,
}

/// An event as written in data, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventDefinition {
    name: String,
    description: String,
    #[serde(default)]
    modifiers: Vec<Modifier>,
    #[serde(default)]
    start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    end_date: Option<DateTime<Utc>>,
}

impl TryFrom<EventDefinition> for Event {
    type Error = EngineError;

    /// Checks name, description and date window. The operator policy is
    /// applied by whoever loads the definition.
    fn try_from(definition: EventDefinition) -> Result<Self, Self::Error> {
        let event = Event::from_parts(
            definition.name,
            definition.description,
            definition.modifiers,
            definition.start_date,
            definition.end_date,
        );
        event.validate(&EngineConfig::default())?;
        Ok(event)
    }
}

impl Event {
    /// Start building an event.
    #[must_use]
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    pub(crate) fn from_parts(
        name: String,
        description: String,
        modifiers: Vec<Modifier>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name,
            description,
            modifiers,
            start_date,
            end_date,
        }
    }

    /// Event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Event description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Modifiers, in application order.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// First instant the event is live, if bounded.
    #[must_use]
    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Last instant the event is live, if bounded.
    #[must_use]
    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Check if the event carries no modifiers (identity transform).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Check if `at` falls inside the event window. Both ends are inclusive;
    /// a missing end is unbounded.
    #[must_use]
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.start_date.is_none_or(|start| start <= at) && self.end_date.is_none_or(|end| at <= end)
    }

    /// Apply every modifier to a target, in order.
    #[must_use]
    pub fn apply(&self, target: &Value) -> Value {
        apply_modifiers(target, &self.modifiers)
    }

    /// Apply every modifier to a typed snapshot.
    pub fn apply_typed<T>(&self, target: &T) -> Result<T, EngineError>
    where
        T: Serialize + DeserializeOwned,
    {
        apply_modifiers_typed(target, &self.modifiers)
    }

    /// Operator symbols used by the event that the engine does not recognize.
    pub fn unknown_operators(&self) -> impl Iterator<Item = &str> {
        self.modifiers.iter().flat_map(Modifier::unknown_operators)
    }

    /// Check the definition: name, description, date window and operators.
    ///
    /// Unknown operators only fail under [`OperatorPolicy::Strict`](crate::core::OperatorPolicy::Strict).
    pub fn validate(&self, config: &EngineConfig) -> Result<(), EngineError> {
        if self.name.trim().is_empty() {
            return Err(EngineError::MissingName);
        }
        if self.description.trim().is_empty() {
            return Err(EngineError::MissingDescription {
                event: self.name.clone(),
            });
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(EngineError::InvalidDateWindow {
                    event: self.name.clone(),
                });
            }
        }
        if config.is_strict() {
            if let Some(operator) = self.unknown_operators().next() {
                return Err(EngineError::UnknownOperator {
                    event: self.name.clone(),
                    operator: operator.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Log unknown operators accepted under the permissive policy.
    pub(crate) fn warn_unknown_operators(&self) {
        for operator in self.unknown_operators() {
            tracing::warn!(
                event = %self.name,
                operator,
                "unknown operator accepted; affected modifiers will never apply"
            );
        }
    }
}
