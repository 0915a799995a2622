//! Event builder.
//!
//! Events are declared once, at startup, with a fluent builder:
//!
//! ```
//! use live_events::core::{path_ref, Value};
//! use live_events::events::Event;
//! use live_events::modifiers::{ConstrainedValue, Modifier};
//!
//! let event = Event::builder()
//!     .name("Skill level up week")
//!     .description("Main skill levels +1, capped at each skill's max level")
//!     .modifier(Modifier::add(
//!         "skillLevel",
//!         ConstrainedValue::new(1).with_max(path_ref("pokemon.skill.maxLevel")),
//!     ))
//!     .compile()
//!     .unwrap();
//!
//! let member = Value::record()
//!     .with_field("skillLevel", 6)
//!     .with_field("pokemon", Value::record()
//!         .with_field("skill", Value::record().with_field("maxLevel", 6)));
//!
//! assert_eq!(event.apply(&member).get(&"skillLevel".into()), Some(&Value::from(6)));
//! ```
//!
//! ## Parameterized Events
//!
//! Some events depend on a caller-supplied input, such as the berry the
//! player favors this season. Give the builder an input type and compile
//! it into an [`EventFactory`]; every call re-runs the modifier closures.
//!
//! ```
//! use live_events::conditions::Condition;
//! use live_events::events::EventBuilder;
//! use live_events::modifiers::Modifier;
//!
//! let favorite_berry = EventBuilder::<String>::with_input()
//!     .name("Favorite berry")
//!     .description("Favorite berries give 2x strength")
//!     .modifier_fn(|berry: &String| {
//!         Modifier::multiply("berryStrength", 2)
//!             .with_condition(Condition::equals("pokemon.berry.name", berry.as_str()))
//!     })
//!     .compile_factory()
//!     .unwrap();
//!
//! let oran = favorite_berry.create(&"ORAN".to_string());
//! let pecha = favorite_berry.create(&"PECHA".to_string());
//! assert_ne!(oran, pecha);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::{EngineConfig, EngineError};
use crate::modifiers::Modifier;

use super::event::Event;

type ModifierFn<I> = Arc<dyn Fn(&I) -> Modifier + Send + Sync>;

/// A modifier as declared on the builder.
enum ModifierSource<I> {
    Fixed(Modifier),
    Deferred(ModifierFn<I>),
}

impl<I> ModifierSource<I> {
    fn produce(&self, input: &I) -> Modifier {
        match self {
            ModifierSource::Fixed(modifier) => modifier.clone(),
            ModifierSource::Deferred(factory) => factory(input),
        }
    }
}

impl<I> Clone for ModifierSource<I> {
    fn clone(&self) -> Self {
        match self {
            ModifierSource::Fixed(modifier) => ModifierSource::Fixed(modifier.clone()),
            ModifierSource::Deferred(factory) => ModifierSource::Deferred(Arc::clone(factory)),
        }
    }
}

/// Fluent builder for [`Event`]s.
///
/// `I` is the input type of parameterized events; `()` for plain events.
pub struct EventBuilder<I = ()> {
    name: Option<String>,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    modifiers: Vec<ModifierSource<I>>,
    config: EngineConfig,
}

impl EventBuilder {
    /// Create a builder for a plain event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile into an event.
    ///
    /// Modifier closures are invoked once, with `()`. An event with no
    /// modifiers is valid and leaves every target unchanged.
    pub fn compile(self) -> Result<Event, EngineError> {
        let (name, description) = self.header()?;
        let modifiers = self.modifiers.iter().map(|m| m.produce(&())).collect();
        let event = Event::from_parts(name, description, modifiers, self.start_date, self.end_date);

        event.validate(&self.config)?;
        event.warn_unknown_operators();
        tracing::debug!(
            event = event.name(),
            modifiers = event.modifiers().len(),
            "compiled event"
        );
        Ok(event)
    }
}

impl<I> Default for EventBuilder<I> {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            start_date: None,
            end_date: None,
            modifiers: Vec::new(),
            config: EngineConfig::default(),
        }
    }
}

impl<I> EventBuilder<I> {
    /// Create a builder for an event parameterized by `I`.
    #[must_use]
    pub fn with_input() -> Self {
        Self::default()
    }

    /// Set the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the first live instant.
    #[must_use]
    pub fn start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Set the last live instant.
    #[must_use]
    pub fn end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Set both ends of the live window.
    #[must_use]
    pub fn active_between(self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date(start).end_date(end)
    }

    /// Append a modifier.
    #[must_use]
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(ModifierSource::Fixed(modifier));
        self
    }

    /// Append several modifiers.
    #[must_use]
    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers
            .extend(modifiers.into_iter().map(ModifierSource::Fixed));
        self
    }

    /// Append a modifier computed from the event input.
    #[must_use]
    pub fn modifier_fn<F>(mut self, factory: F) -> Self
    where
        F: Fn(&I) -> Modifier + Send + Sync + 'static,
    {
        self.modifiers
            .push(ModifierSource::Deferred(Arc::new(factory)));
        self
    }

    /// Use a non-default configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Compile into a factory producing a fresh event per input.
    ///
    /// Name, description, date window and the fixed modifiers are checked
    /// now; modifiers built from the input are checked by
    /// [`EventFactory::try_create`].
    pub fn compile_factory(self) -> Result<EventFactory<I>, EngineError> {
        let (name, description) = self.header()?;
        let fixed = self
            .modifiers
            .iter()
            .filter_map(|m| match m {
                ModifierSource::Fixed(modifier) => Some(modifier.clone()),
                ModifierSource::Deferred(_) => None,
            })
            .collect();
        let skeleton = Event::from_parts(name, description, fixed, self.start_date, self.end_date);

        skeleton.validate(&self.config)?;
        skeleton.warn_unknown_operators();
        tracing::debug!(
            event = skeleton.name(),
            modifiers = self.modifiers.len(),
            "compiled event factory"
        );

        Ok(EventFactory {
            name: skeleton.name().to_string(),
            description: skeleton.description().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            modifiers: self.modifiers.into(),
            config: self.config,
        })
    }

    fn header(&self) -> Result<(String, String), EngineError> {
        let name = self
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or(EngineError::MissingName)?;
        let description = self
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| EngineError::MissingDescription { event: name.clone() })?;
        Ok((name, description))
    }
}

/// Produces a fresh [`Event`] for each input.
///
/// Nothing is cached: two calls with equal inputs return equal but separate
/// events.
pub struct EventFactory<I> {
    name: String,
    description: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    modifiers: Arc<[ModifierSource<I>]>,
    config: EngineConfig,
}

impl<I> EventFactory<I> {
    /// Name of the events this factory produces.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of the events this factory produces.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Build the event for an input.
    #[must_use]
    pub fn create(&self, input: &I) -> Event {
        Event::from_parts(
            self.name.clone(),
            self.description.clone(),
            self.modifiers.iter().map(|m| m.produce(input)).collect(),
            self.start_date,
            self.end_date,
        )
    }

    /// Build the event for an input and check it against the configuration.
    pub fn try_create(&self, input: &I) -> Result<Event, EngineError> {
        let event = self.create(input);
        event.validate(&self.config)?;
        Ok(event)
    }
}

impl<I> Clone for EventFactory<I> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            modifiers: Arc::clone(&self.modifiers),
            config: self.config.clone(),
        }
    }
}

impl<I> std::fmt::Debug for EventFactory<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventFactory")
            .field("name", &self.name)
            .field("modifiers", &self.modifiers.len())
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .finish()
    }
}
