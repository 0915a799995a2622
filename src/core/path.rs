//! Paths into target snapshots and the resolver that walks them.
//!
//! A path is a dot-separated string such as `pokemon.skill.maxLevel`.
//! Each segment is one of:
//! - a field name (`frequency`)
//! - a non-negative index, bare (`members.2`) or bracketed (`members[2]`)
//! - a wildcard (`*`), which only documents "every element" and never
//!   resolves at runtime
//!
//! Parsing is total. Text that is not an index or wildcard is a field name,
//! so a malformed path is not an error; it simply never resolves.
//!
//! ## Resolver
//!
//! ```
//! use live_events::core::{Path, Value};
//!
//! let target = Value::record()
//!     .with_field("pokemon", Value::record().with_field("frequency", 2400));
//!
//! let path = Path::from("pokemon.frequency");
//! assert_eq!(target.get(&path), Some(&Value::from(2400)));
//!
//! let faster = target.set(&path, Value::from(2160));
//! assert_eq!(faster.get(&path), Some(&Value::from(2160)));
//! assert_eq!(target.get(&path), Some(&Value::from(2400)));
//! ```

use im::OrdMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::value::Value;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Record field.
    Field(String),
    /// List position (or numeric record key).
    Index(usize),
    /// Every element. Never resolved at runtime.
    Wildcard,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Field(name) => write!(f, "{}", name),
            Segment::Index(index) => write!(f, "{}", index),
            Segment::Wildcard => write!(f, "*"),
        }
    }
}

/// A parsed, dot-separated location inside a target.
///
/// Keeps its source text for display and serialization. Paths observed in
/// event definitions are shallow (four or five segments), so segments live
/// inline.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Path {
    raw: String,
    segments: SmallVec<[Segment; 4]>,
}

impl Path {
    /// Parse a path.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut segments = SmallVec::new();
        for part in raw.split('.') {
            parse_part(part, &mut segments);
        }
        Self { raw, segments }
    }

    /// The source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check for wildcard segments.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Wildcard))
    }
}

fn parse_part(part: &str, out: &mut SmallVec<[Segment; 4]>) {
    if let Some(segment) = parse_plain(part) {
        out.push(segment);
        return;
    }

    // `name[0]`, `name[0][1]`, `name[*]`
    if let Some(open) = part.find('[') {
        if let Some(indices) = parse_brackets(&part[open..]) {
            let name = &part[..open];
            if !name.is_empty() {
                out.push(Segment::Field(name.to_string()));
            }
            out.extend(indices);
            return;
        }
    }

    out.push(Segment::Field(part.to_string()));
}

fn parse_plain(part: &str) -> Option<Segment> {
    if part == "*" {
        return Some(Segment::Wildcard);
    }
    if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
        return part.parse().ok().map(Segment::Index);
    }
    None
}

fn parse_brackets(mut rest: &str) -> Option<SmallVec<[Segment; 2]>> {
    let mut indices = SmallVec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        indices.push(parse_plain(&inner[..close])?);
        rest = &inner[close + 1..];
    }
    Some(indices)
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Path {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Path {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.raw
    }
}

/// A value to be read from the target at apply time instead of a literal.
///
/// Serialized as `{"ref": "pokemon.skill.maxLevel"}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathRef {
    #[serde(rename = "ref")]
    path: Path,
}

impl PathRef {
    /// Create a reference to a path.
    pub fn new(path: impl Into<Path>) -> Self {
        Self { path: path.into() }
    }

    /// The referenced path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the referenced value from a target.
    #[must_use]
    pub fn resolve<'a>(&self, target: &'a Value) -> Option<&'a Value> {
        target.get(&self.path)
    }
}

/// Shorthand for [`PathRef::new`].
pub fn path_ref(path: impl Into<Path>) -> PathRef {
    PathRef::new(path)
}

/// Either a literal value or a reference resolved against the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSource {
    /// Read from the target when used.
    Ref(PathRef),
    /// Fixed value.
    Literal(Value),
}

impl ValueSource {
    /// Resolve against a target. `None` when a reference does not resolve.
    #[must_use]
    pub fn resolve<'a>(&'a self, target: &'a Value) -> Option<&'a Value> {
        match self {
            ValueSource::Literal(value) => Some(value),
            ValueSource::Ref(reference) => reference.resolve(target),
        }
    }

    /// The reference, if this is not a literal.
    #[must_use]
    pub fn path_ref(&self) -> Option<&PathRef> {
        match self {
            ValueSource::Ref(reference) => Some(reference),
            ValueSource::Literal(_) => None,
        }
    }
}

impl From<PathRef> for ValueSource {
    fn from(reference: PathRef) -> Self {
        ValueSource::Ref(reference)
    }
}

impl From<Value> for ValueSource {
    fn from(value: Value) -> Self {
        ValueSource::Literal(value)
    }
}

impl From<f64> for ValueSource {
    fn from(v: f64) -> Self {
        ValueSource::Literal(v.into())
    }
}

impl From<i32> for ValueSource {
    fn from(v: i32) -> Self {
        ValueSource::Literal(v.into())
    }
}

impl From<i64> for ValueSource {
    fn from(v: i64) -> Self {
        ValueSource::Literal(v.into())
    }
}

impl From<bool> for ValueSource {
    fn from(v: bool) -> Self {
        ValueSource::Literal(v.into())
    }
}

impl From<&str> for ValueSource {
    fn from(v: &str) -> Self {
        ValueSource::Literal(v.into())
    }
}

impl From<String> for ValueSource {
    fn from(v: String) -> Self {
        ValueSource::Literal(v.into())
    }
}

impl From<Vec<Value>> for ValueSource {
    fn from(v: Vec<Value>) -> Self {
        ValueSource::Literal(v.into())
    }
}

// === Resolver ===

/// Most `Null`s a single write may append to reach an index past the end of
/// a list. Writes further out leave the list unchanged.
const MAX_LIST_PADDING: usize = 1024;

impl Value {
    /// Read the value at a path. `None` means "undefined".
    ///
    /// Stops at the first null or scalar intermediate.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Return a copy with the value at `path` replaced.
    ///
    /// Each ancestor is copied with one child swapped; every sibling subtree
    /// is shared with `self`. Missing or scalar intermediates become empty
    /// records. Writing past the end of a list pads it with `Null`, up to a
    /// bounded gap; a write further out, or a path with a wildcard, returns
    /// `self` unchanged.
    #[must_use]
    pub fn set(&self, path: &Path, value: Value) -> Value {
        if path.has_wildcard() {
            return self.clone();
        }
        self.set_segments(path.segments(), value)
    }

    fn child(&self, segment: &Segment) -> Option<&Value> {
        match (self, segment) {
            (Value::Record(fields), Segment::Field(name)) => fields.get(name.as_str()),
            (Value::Record(fields), Segment::Index(index)) => {
                fields.get(index.to_string().as_str())
            }
            (Value::List(items), Segment::Index(index)) => items.get(*index),
            _ => None,
        }
    }

    fn set_segments(&self, segments: &[Segment], value: Value) -> Value {
        let Some((head, rest)) = segments.split_first() else {
            return value;
        };

        let child = if rest.is_empty() {
            value
        } else {
            match self.child(head) {
                Some(node) => node.set_segments(rest, value),
                None => Value::Null.set_segments(rest, value),
            }
        };

        self.with_child(head, child)
    }

    fn with_child(&self, segment: &Segment, child: Value) -> Value {
        match (self, segment) {
            (Value::Record(fields), Segment::Field(name)) => {
                Value::Record(fields.update(name.clone(), child))
            }
            (Value::Record(fields), Segment::Index(index)) => {
                Value::Record(fields.update(index.to_string(), child))
            }
            (Value::List(items), Segment::Index(index))
                if index.saturating_sub(items.len()) > MAX_LIST_PADDING =>
            {
                self.clone()
            }
            (Value::List(items), Segment::Index(index)) => {
                let mut items = items.clone();
                if *index < items.len() {
                    items.set(*index, child);
                } else {
                    while items.len() < *index {
                        items.push_back(Value::Null);
                    }
                    items.push_back(child);
                }
                Value::List(items)
            }
            (_, Segment::Field(name)) => Value::Record(OrdMap::unit(name.clone(), child)),
            (_, Segment::Index(index)) => Value::Record(OrdMap::unit(index.to_string(), child)),
            (_, Segment::Wildcard) => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::record()
            .with_field(
                "pokemon",
                Value::record()
                    .with_field("frequency", 2400)
                    .with_field("skill", Value::record().with_field("maxLevel", 6)),
            )
            .with_field(
                "members",
                Value::list()
                    .with_item(Value::record().with_field("level", 10))
                    .with_item(Value::record().with_field("level", 25)),
            )
            .with_field("island", Value::Null)
    }

    #[test]
    fn test_parse_segments() {
        let path = Path::from("pokemon.skill.maxLevel");
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments()[2], Segment::Field("maxLevel".to_string()));
        assert_eq!(path.to_string(), "pokemon.skill.maxLevel");
    }

    #[test]
    fn test_parse_indices() {
        let bare = Path::from("members.1.level");
        let bracketed = Path::from("members[1].level");
        assert_eq!(bare.segments(), bracketed.segments());
        assert_eq!(bare.segments()[1], Segment::Index(1));

        let nested = Path::from("grid[0][2]");
        assert_eq!(
            nested.segments(),
            &[
                Segment::Field("grid".to_string()),
                Segment::Index(0),
                Segment::Index(2),
            ]
        );
    }

    #[test]
    fn test_parse_wildcard() {
        assert!(Path::from("members.*.level").has_wildcard());
        assert!(Path::from("members[*].level").has_wildcard());
        assert!(!Path::from("members.0.level").has_wildcard());
    }

    #[test]
    fn test_parse_malformed_is_a_field() {
        let path = Path::from("members[x");
        assert_eq!(path.segments(), &[Segment::Field("members[x".to_string())]);
        assert!(sample().get(&path).is_none());
    }

    #[test]
    fn test_get_nested() {
        let target = sample();
        assert_eq!(
            target.get(&"pokemon.skill.maxLevel".into()),
            Some(&Value::from(6))
        );
        assert_eq!(target.get(&"members[1].level".into()), Some(&Value::from(25)));
        assert_eq!(target.get(&"members.0.level".into()), Some(&Value::from(10)));
    }

    #[test]
    fn test_get_missing_is_undefined() {
        let target = sample();
        assert!(target.get(&"pokemon.speed".into()).is_none());
        assert!(target.get(&"members.5.level".into()).is_none());
        assert!(target.get(&"pokemon.frequency.value".into()).is_none());
    }

    #[test]
    fn test_get_stops_at_null() {
        let target = sample();
        assert_eq!(target.get(&"island".into()), Some(&Value::Null));
        assert!(target.get(&"island.name".into()).is_none());
    }

    #[test]
    fn test_get_wildcard_never_resolves() {
        assert!(sample().get(&"members.*.level".into()).is_none());
    }

    #[test]
    fn test_get_numeric_record_key() {
        let target = Value::record().with_field("0", "first");
        assert_eq!(target.get(&"0".into()), Some(&Value::from("first")));
    }

    #[test]
    fn test_set_single_segment() {
        let target = Value::record().with_field("skillLevel", 3).with_field("name", "Pikachu");
        let updated = target.set(&"skillLevel".into(), Value::from(6));

        assert_eq!(updated.get(&"skillLevel".into()), Some(&Value::from(6)));
        assert_eq!(updated.get(&"name".into()), Some(&Value::from("Pikachu")));
        assert_eq!(target.get(&"skillLevel".into()), Some(&Value::from(3)));
    }

    #[test]
    fn test_set_shares_siblings() {
        let target = sample();
        let updated = target.set(&"pokemon.frequency".into(), Value::from(2160));

        assert_eq!(updated.get(&"pokemon.frequency".into()), Some(&Value::from(2160)));
        assert_eq!(updated.get(&"members".into()), target.get(&"members".into()));
        assert_eq!(
            updated.get(&"pokemon.skill".into()),
            target.get(&"pokemon.skill".into())
        );
        assert_eq!(target.get(&"pokemon.frequency".into()), Some(&Value::from(2400)));
    }

    #[test]
    fn test_set_list_element() {
        let updated = sample().set(&"members[1].level".into(), Value::from(30));
        assert_eq!(updated.get(&"members.1.level".into()), Some(&Value::from(30)));
        assert_eq!(updated.get(&"members.0.level".into()), Some(&Value::from(10)));
    }

    #[test]
    fn test_set_creates_missing_records() {
        let updated = Value::record().set(&"bonus.berry.strength".into(), Value::from(1.5));
        assert_eq!(
            updated.get(&"bonus.berry.strength".into()),
            Some(&Value::from(1.5))
        );
    }

    #[test]
    fn test_set_past_end_of_list_pads_with_null() {
        let target = Value::record().with_field("items", Value::list().with_item(1));
        let updated = target.set(&"items.3".into(), Value::from(4));
        let items = updated.get(&"items".into()).and_then(Value::as_list).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[1], Value::Null);
        assert_eq!(items[3], Value::from(4));
    }

    #[test]
    fn test_set_far_past_end_of_list_is_unchanged() {
        let target = Value::record().with_field("items", Value::list().with_item(1));
        assert_eq!(target.set(&"items.100000000000".into(), Value::from(4)), target);
        assert_eq!(target.set(&"items[100000000000].level".into(), Value::from(4)), target);

        let edge_path = Path::parse(format!("items.{}", 1 + MAX_LIST_PADDING));
        let edge = target.set(&edge_path, Value::from(4));
        let items = edge.get(&"items".into()).and_then(Value::as_list).unwrap();
        assert_eq!(items.len(), MAX_LIST_PADDING + 2);
    }

    #[test]
    fn test_set_wildcard_is_unchanged() {
        let target = sample();
        assert_eq!(target.set(&"members.*.level".into(), Value::from(1)), target);
    }

    #[test]
    fn test_path_ref_resolves() {
        let reference = path_ref("pokemon.skill.maxLevel");
        assert_eq!(reference.resolve(&sample()), Some(&Value::from(6)));
        assert_eq!(reference.path().as_str(), "pokemon.skill.maxLevel");
    }

    #[test]
    fn test_value_source_resolve() {
        let target = sample();
        assert_eq!(ValueSource::from(3).resolve(&target), Some(&Value::from(3)));
        assert_eq!(
            ValueSource::from(path_ref("pokemon.frequency")).resolve(&target),
            Some(&Value::from(2400))
        );
        assert!(ValueSource::from(path_ref("pokemon.speed")).resolve(&target).is_none());
    }

    #[test]
    fn test_path_serialization() {
        let path = Path::from("members[1].level");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"members[1].level\"");
        let deserialized: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, deserialized);
    }

    #[test]
    fn test_value_source_serialization() {
        let reference: ValueSource = serde_json::from_str(r#"{"ref": "pokemon.frequency"}"#).unwrap();
        assert_eq!(reference, ValueSource::from(path_ref("pokemon.frequency")));

        let literal: ValueSource = serde_json::from_str("0.9").unwrap();
        assert_eq!(literal, ValueSource::from(0.9));

        let record: ValueSource = serde_json::from_str(r#"{"ref": "a", "extra": 1}"#).unwrap();
        assert!(record.path_ref().is_none());
    }
}
