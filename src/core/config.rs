//! Engine configuration.
//!
//! The only tunable today is how unrecognized operator symbols are treated.
//! Event definitions loaded from data can carry any operator text; Rust
//! authored events normally use the typed variants and never hit this.

use serde::{Deserialize, Serialize};

/// What to do with an operator symbol the engine does not recognize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorPolicy {
    /// Accept the event; the offending modifier or condition never applies.
    #[default]
    Permissive,
    /// Reject the event when it is compiled or loaded.
    Strict,
}

/// Engine configuration.
///
/// Passed to the event builder and the catalog loader.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Handling of unrecognized operators.
    pub operator_policy: OperatorPolicy,
}

impl EngineConfig {
    /// Create the default (permissive) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that rejects unknown operators.
    #[must_use]
    pub fn strict() -> Self {
        Self::new().with_operator_policy(OperatorPolicy::Strict)
    }

    /// Set the operator policy.
    #[must_use]
    pub fn with_operator_policy(mut self, policy: OperatorPolicy) -> Self {
        self.operator_policy = policy;
        self
    }

    /// Check if unknown operators are rejected.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.operator_policy == OperatorPolicy::Strict
    }
}
