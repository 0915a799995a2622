//! Condition definitions.
//!
//! A condition compares a left value against a right value. There are two
//! kinds, distinguished by where the left value comes from:
//!
//! - **Target**: read from the target at `left_value_path`. The right side is
//!   a literal or a [`PathRef`](crate::core::PathRef) into the same target.
//! - **External**: a literal supplied by the caller when the event is built
//!   (current island id, a random-roll bucket). Nothing is resolved.
//!
//! A text `leftValue` is never an external fact: it names a path and is read
//! from the target like `leftValuePath`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::core::{Path, Value, ValueSource};

/// Comparison operator.
///
/// Serialized as its symbol. Symbols the engine does not recognize are kept
/// as `Unknown` and never hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComparisonOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `in`: left value is an item of the right list.
    In,
    /// `not-in`: left value is not an item of the right list.
    NotIn,
    /// Unrecognized symbol.
    Unknown(String),
}

impl ComparisonOp {
    /// Parse an operator symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "=" => Self::Eq,
            "!=" => Self::Ne,
            ">" => Self::Gt,
            "<" => Self::Lt,
            ">=" => Self::Ge,
            "<=" => Self::Le,
            "in" => Self::In,
            "not-in" => Self::NotIn,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The operator symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::In => "in",
            Self::NotIn => "not-in",
            Self::Unknown(symbol) => symbol,
        }
    }

    /// Check if the symbol was recognized.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<String> for ComparisonOp {
    fn from(symbol: String) -> Self {
        Self::from_symbol(&symbol)
    }
}

impl From<&str> for ComparisonOp {
    fn from(symbol: &str) -> Self {
        Self::from_symbol(symbol)
    }
}

impl From<ComparisonOp> for String {
    fn from(op: ComparisonOp) -> Self {
        op.symbol().to_string()
    }
}

/// A predicate gating a modifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Compare a value read from the target.
    #[serde(rename_all = "camelCase")]
    Target {
        left_value_path: Path,
        operation: ComparisonOp,
        right_value: ValueSource,
    },

    /// Compare two caller-supplied literals. A text `left_value` is a path
    /// read from the target instead.
    #[serde(rename_all = "camelCase")]
    External {
        left_value: Value,
        operation: ComparisonOp,
        right_value: Value,
    },
}

impl Condition {
    /// Create a target-relative condition.
    pub fn target(
        path: impl Into<Path>,
        operation: impl Into<ComparisonOp>,
        right: impl Into<ValueSource>,
    ) -> Self {
        Self::Target {
            left_value_path: path.into(),
            operation: operation.into(),
            right_value: right.into(),
        }
    }

    /// Create an external condition over caller-supplied values.
    ///
    /// Pass a number, bool or list as `left`; text is treated as a path.
    pub fn external(
        left: impl Into<Value>,
        operation: impl Into<ComparisonOp>,
        right: impl Into<Value>,
    ) -> Self {
        Self::External {
            left_value: left.into(),
            operation: operation.into(),
            right_value: right.into(),
        }
    }

    /// Target value equals `right`.
    pub fn equals(path: impl Into<Path>, right: impl Into<ValueSource>) -> Self {
        Self::target(path, ComparisonOp::Eq, right)
    }

    /// Target value differs from `right`.
    pub fn not_equals(path: impl Into<Path>, right: impl Into<ValueSource>) -> Self {
        Self::target(path, ComparisonOp::Ne, right)
    }

    /// Target value is greater than `right`.
    pub fn greater_than(path: impl Into<Path>, right: impl Into<ValueSource>) -> Self {
        Self::target(path, ComparisonOp::Gt, right)
    }

    /// Target value is less than `right`.
    pub fn less_than(path: impl Into<Path>, right: impl Into<ValueSource>) -> Self {
        Self::target(path, ComparisonOp::Lt, right)
    }

    /// Target value is at least `right`.
    pub fn at_least(path: impl Into<Path>, right: impl Into<ValueSource>) -> Self {
        Self::target(path, ComparisonOp::Ge, right)
    }

    /// Target value is at most `right`.
    pub fn at_most(path: impl Into<Path>, right: impl Into<ValueSource>) -> Self {
        Self::target(path, ComparisonOp::Le, right)
    }

    /// Target value is one of `items`.
    pub fn one_of<T: Into<Value>>(
        path: impl Into<Path>,
        items: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::target(path, ComparisonOp::In, items.into_iter().collect::<Value>())
    }

    /// Target value is none of `items`.
    pub fn none_of<T: Into<Value>>(
        path: impl Into<Path>,
        items: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::target(path, ComparisonOp::NotIn, items.into_iter().collect::<Value>())
    }

    /// The comparison operator.
    #[must_use]
    pub fn operation(&self) -> &ComparisonOp {
        match self {
            Self::Target { operation, .. } | Self::External { operation, .. } => operation,
        }
    }

    /// Path the left side is read from, if any.
    ///
    /// Text on the left of an external condition is parsed as a path.
    #[must_use]
    pub fn left_path(&self) -> Option<Cow<'_, Path>> {
        match self {
            Self::Target {
                left_value_path, ..
            } => Some(Cow::Borrowed(left_value_path)),
            Self::External {
                left_value: Value::Text(path),
                ..
            } => Some(Cow::Owned(Path::parse(path.as_str()))),
            Self::External { .. } => None,
        }
    }

    /// Check if this condition compares caller-supplied values only.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.left_path().is_none()
    }

    /// Paths this condition reads from the target.
    pub fn paths(&self) -> impl Iterator<Item = Cow<'_, Path>> {
        let right = match self {
            Self::Target { right_value, .. } => right_value.path_ref(),
            Self::External { .. } => None,
        };
        self.left_path()
            .into_iter()
            .chain(right.map(|reference| Cow::Borrowed(reference.path())))
    }
}
