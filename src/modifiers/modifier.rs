//! Modifier definitions.
//!
//! A modifier is one path-addressed arithmetic step:
//! `value_at(path) = value_at(path) OP operand`, optionally clamped and
//! gated by conditions. Modifiers know nothing about the shape of the
//! target; they apply wherever their path resolves.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::conditions::Condition;
use crate::core::{Path, PathRef, Value, ValueSource};

/// Arithmetic operator.
///
/// Serialized as its symbol. Unrecognized symbols are kept as `Unknown` and
/// leave the target unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArithmeticOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `=`: replace the current value with the operand.
    Assign,
    /// Unrecognized symbol.
    Unknown(String),
}

impl ArithmeticOp {
    /// Parse an operator symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "=" => Self::Assign,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The operator symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Assign => "=",
            Self::Unknown(symbol) => symbol,
        }
    }

    /// Check if the symbol was recognized.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Combine the current value with an operand.
    ///
    /// Arithmetic coerces both sides to numbers. `Assign` returns the operand
    /// as is. `Unknown` returns `None`.
    #[must_use]
    pub fn combine(&self, current: &Value, operand: &Value) -> Option<Value> {
        let (lhs, rhs) = (current.to_number(), operand.to_number());
        match self {
            Self::Add => Some(Value::Number(lhs + rhs)),
            Self::Subtract => Some(Value::Number(lhs - rhs)),
            Self::Multiply => Some(Value::Number(lhs * rhs)),
            Self::Divide => Some(Value::Number(lhs / rhs)),
            Self::Assign => Some(operand.clone()),
            Self::Unknown(_) => None,
        }
    }
}

impl std::fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<String> for ArithmeticOp {
    fn from(symbol: String) -> Self {
        Self::from_symbol(&symbol)
    }
}

impl From<&str> for ArithmeticOp {
    fn from(symbol: &str) -> Self {
        Self::from_symbol(symbol)
    }
}

impl From<ArithmeticOp> for String {
    fn from(op: ArithmeticOp) -> Self {
        op.symbol().to_string()
    }
}

/// Label for the kind of target a modifier was written for.
///
/// The engine doesn't interpret target kinds; applicability is decided by
/// whether the path resolves. Events use the label for documentation and
/// reporting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetKind(pub String);

impl TargetKind {
    /// Create a new target kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Get the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An operand with optional bounds, applied after the arithmetic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstrainedValue {
    /// The operand.
    #[serde(rename = "rightValue", alias = "value")]
    pub value: ValueSource,

    /// Lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<ValueSource>,

    /// Upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<ValueSource>,
}

impl ConstrainedValue {
    /// Create an unbounded constrained operand.
    pub fn new(value: impl Into<ValueSource>) -> Self {
        Self {
            value: value.into(),
            min: None,
            max: None,
        }
    }

    /// Set the lower bound (builder pattern).
    #[must_use]
    pub fn with_min(mut self, min: impl Into<ValueSource>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set the upper bound (builder pattern).
    #[must_use]
    pub fn with_max(mut self, max: impl Into<ValueSource>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Clamp an arithmetic result into the bounds resolved against `target`.
    ///
    /// The lower bound is applied first, then the upper bound. `None` when a
    /// declared bound does not resolve, so the modifier is skipped rather
    /// than written back uncapped. A bound that resolves to something that
    /// is not a number is ignored. A `NaN` result stays `NaN`.
    #[must_use]
    pub fn clamp(&self, result: Value, target: &Value) -> Option<Value> {
        let min = Self::bound(self.min.as_ref(), target)?;
        let max = Self::bound(self.max.as_ref(), target)?;
        if min.is_none() && max.is_none() {
            return Some(result);
        }

        let mut n = result.to_number();
        if let Some(min) = min {
            if n < min {
                n = min;
            }
        }
        if let Some(max) = max {
            if n > max {
                n = max;
            }
        }
        Some(Value::Number(n))
    }

    /// Outer `None`: declared but unresolved. Inner `None`: no usable bound.
    fn bound(source: Option<&ValueSource>, target: &Value) -> Option<Option<f64>> {
        match source {
            None => Some(None),
            Some(source) => source
                .resolve(target)
                .map(|value| Some(value.to_number()).filter(|n| !n.is_nan())),
        }
    }
}

/// The right-hand side of a modifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Operand with bounds.
    Constrained(ConstrainedValue),
    /// Plain literal or reference.
    Source(ValueSource),
}

impl Operand {
    /// The unclamped operand.
    #[must_use]
    pub fn value(&self) -> &ValueSource {
        match self {
            Operand::Constrained(constrained) => &constrained.value,
            Operand::Source(source) => source,
        }
    }

    /// Every reference the operand reads (value and bounds).
    pub fn path_refs(&self) -> impl Iterator<Item = &PathRef> {
        let (value, min, max) = match self {
            Operand::Constrained(c) => (&c.value, c.min.as_ref(), c.max.as_ref()),
            Operand::Source(source) => (source, None, None),
        };
        std::iter::once(value)
            .chain(min)
            .chain(max)
            .filter_map(ValueSource::path_ref)
    }
}

impl From<ConstrainedValue> for Operand {
    fn from(constrained: ConstrainedValue) -> Self {
        Operand::Constrained(constrained)
    }
}

impl From<ValueSource> for Operand {
    fn from(source: ValueSource) -> Self {
        Operand::Source(source)
    }
}

impl From<PathRef> for Operand {
    fn from(reference: PathRef) -> Self {
        Operand::Source(reference.into())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Source(value.into())
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Source(v.into())
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Source(v.into())
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Source(v.into())
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Operand::Source(v.into())
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Source(v.into())
    }
}

/// A conditional, path-addressed transformation of a target.
///
/// ## Example
///
/// ```
/// use live_events::core::path_ref;
/// use live_events::conditions::Condition;
/// use live_events::modifiers::{ConstrainedValue, Modifier};
///
/// // "Skill level +1 for Grepa berry Pokémon, capped at the skill's max level"
/// let modifier = Modifier::add(
///     "skillLevel",
///     ConstrainedValue::new(1).with_max(path_ref("pokemon.skill.maxLevel")),
/// )
/// .with_condition(Condition::equals("pokemon.berry.name", "GREPA"));
///
/// assert_eq!(modifier.conditions.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    /// Kind of target the modifier was written for (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_kind: Option<TargetKind>,

    /// Location of the value to transform.
    #[serde(rename = "leftValuePath")]
    pub path: Path,

    /// Arithmetic operator.
    pub operation: ArithmeticOp,

    /// Right-hand side.
    #[serde(rename = "rightValue")]
    pub operand: Operand,

    /// Conditions that must all hold.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Modifier {
    /// Create a new modifier.
    pub fn new(
        path: impl Into<Path>,
        operation: impl Into<ArithmeticOp>,
        operand: impl Into<Operand>,
    ) -> Self {
        Self {
            target_kind: None,
            path: path.into(),
            operation: operation.into(),
            operand: operand.into(),
            conditions: Vec::new(),
        }
    }

    /// Create an addition modifier.
    pub fn add(path: impl Into<Path>, operand: impl Into<Operand>) -> Self {
        Self::new(path, ArithmeticOp::Add, operand)
    }

    /// Create a subtraction modifier.
    pub fn subtract(path: impl Into<Path>, operand: impl Into<Operand>) -> Self {
        Self::new(path, ArithmeticOp::Subtract, operand)
    }

    /// Create a multiplication modifier.
    pub fn multiply(path: impl Into<Path>, operand: impl Into<Operand>) -> Self {
        Self::new(path, ArithmeticOp::Multiply, operand)
    }

    /// Create a division modifier.
    pub fn divide(path: impl Into<Path>, operand: impl Into<Operand>) -> Self {
        Self::new(path, ArithmeticOp::Divide, operand)
    }

    /// Create an assignment modifier.
    pub fn assign(path: impl Into<Path>, operand: impl Into<Operand>) -> Self {
        Self::new(path, ArithmeticOp::Assign, operand)
    }

    /// Set the target kind label (builder pattern).
    #[must_use]
    pub fn for_kind(mut self, kind: impl Into<TargetKind>) -> Self {
        self.target_kind = Some(kind.into());
        self
    }

    /// Add a condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add several conditions (builder pattern).
    #[must_use]
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Every path the modifier reads or writes.
    pub fn paths(&self) -> impl Iterator<Item = Cow<'_, Path>> {
        std::iter::once(Cow::Borrowed(&self.path))
            .chain(
                self.operand
                    .path_refs()
                    .map(|reference| Cow::Borrowed(reference.path())),
            )
            .chain(self.conditions.iter().flat_map(Condition::paths))
    }

    /// Operator symbols (arithmetic and comparison) that are not recognized.
    pub fn unknown_operators(&self) -> impl Iterator<Item = &str> {
        let arithmetic = Some(&self.operation)
            .filter(|op| !op.is_known())
            .map(ArithmeticOp::symbol);
        let comparisons = self
            .conditions
            .iter()
            .map(Condition::operation)
            .filter(|op| !op.is_known())
            .map(|op| op.symbol());
        arithmetic.into_iter().chain(comparisons)
    }
}
