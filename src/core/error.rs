//! Engine errors.
//!
//! Every error here is raised while events are being built, loaded or
//! audited. Applying modifiers never fails: a modifier that does not fit a
//! target is skipped.

/// Errors raised while authoring, loading or auditing events.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    // === Authoring ===

    /// The event was compiled without a name.
    #[error("event is missing a name")]
    MissingName,

    /// The event was compiled without a description.
    #[error("event '{event}' is missing a description")]
    MissingDescription { event: String },

    /// The event ends before it starts.
    #[error("event '{event}' ends before it starts")]
    InvalidDateWindow { event: String },

    /// An operator symbol is not recognized and the policy is strict.
    #[error("event '{event}' uses unknown operator '{operator}'")]
    UnknownOperator { event: String, operator: String },

    // === Catalog ===

    /// An event with the same name is already registered.
    #[error("event '{0}' is already registered")]
    DuplicateEvent(String),

    // === Path audit ===

    /// No sample target resolves a path the event relies on.
    #[error("event '{event}' references path '{path}' that no sample target resolves")]
    UnresolvedPath { event: String, path: String },

    /// The event relies on a wildcard path.
    #[error("event '{event}' uses wildcard path '{path}', which never resolves at runtime")]
    WildcardPath { event: String, path: String },

    // === Adapters ===

    /// Converting between a typed snapshot or JSON and a [`Value`](super::Value) failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl EngineError {
    /// Returns true for mistakes in the event definition itself.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingName
                | Self::MissingDescription { .. }
                | Self::InvalidDateWindow { .. }
                | Self::UnknownOperator { .. }
                | Self::DuplicateEvent(_)
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
