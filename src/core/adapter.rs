//! Typed adapters between caller snapshots and [`Value`].
//!
//! Simulators keep their own `serde` structs for Pokémon, team members and
//! strength totals. These adapters convert them to the structural form the
//! engine walks and back again, going through `serde_json::Value`.
//!
//! Whole numbers are written back as JSON integers so that integer fields
//! (`u32` levels, frequencies) deserialize after arithmetic produced an
//! `f64` with no fractional part.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::error::EngineError;
use super::value::Value;

/// Largest integer an `f64` holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Value {
    /// Convert a typed snapshot into a value tree.
    pub fn from_typed<T: Serialize + ?Sized>(snapshot: &T) -> Result<Self, EngineError> {
        Ok(serde_json::to_value(snapshot)?.into())
    }

    /// Convert a value tree back into a typed snapshot.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, EngineError> {
        Ok(serde_json::from_value(JsonValue::from(self.clone()))?)
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::Text(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(fields) => Value::Record(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => number_to_json(n),
            Value::Text(s) => JsonValue::String(s),
            Value::List(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            Value::Record(fields) => JsonValue::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

fn number_to_json(n: f64) -> JsonValue {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        JsonValue::from(n as i64)
    } else {
        // NaN and infinities have no JSON form.
        serde_json::Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Snapshot {
        name: String,
        frequency: u32,
        skill_level: u8,
        berries: Vec<String>,
        bonus: Option<f64>,
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            name: "Pikachu".to_string(),
            frequency: 2400,
            skill_level: 3,
            berries: vec!["GREPA".to_string()],
            bonus: None,
        }
    }

    #[test]
    fn test_from_typed() {
        let value = Value::from_typed(&snapshot()).unwrap();
        assert_eq!(value.get(&"frequency".into()), Some(&Value::from(2400)));
        assert_eq!(value.get(&"skillLevel".into()), Some(&Value::from(3)));
        assert_eq!(value.get(&"berries.0".into()), Some(&Value::from("GREPA")));
        assert_eq!(value.get(&"bonus".into()), Some(&Value::Null));
    }

    #[test]
    fn test_to_typed_after_arithmetic() {
        let value = Value::from_typed(&snapshot()).unwrap();
        let faster = value.set(&"frequency".into(), Value::from(2400.0 * 0.9));

        let typed: Snapshot = faster.to_typed().unwrap();
        assert_eq!(typed.frequency, 2160);
        assert_eq!(typed.name, "Pikachu");
    }

    #[test]
    fn test_to_typed_rejects_fractional_integer() {
        let value = Value::from_typed(&snapshot()).unwrap();
        let broken = value.set(&"frequency".into(), Value::from(2160.5));
        assert!(matches!(
            broken.to_typed::<Snapshot>(),
            Err(EngineError::Serialization(_))
        ));
    }

    #[test]
    fn test_non_finite_numbers_become_null() {
        assert_eq!(JsonValue::from(Value::from(f64::NAN)), JsonValue::Null);
        assert_eq!(JsonValue::from(Value::from(f64::INFINITY)), JsonValue::Null);
        assert_eq!(JsonValue::from(Value::from(1.25)), serde_json::json!(1.25));
        assert_eq!(JsonValue::from(Value::from(7.0)), serde_json::json!(7));
    }

    #[test]
    fn test_value_serialization() {
        let value = Value::record()
            .with_field("frequency", 2400)
            .with_field("favorites", Value::list().with_item("ORAN"));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"favorites":["ORAN"],"frequency":2400}"#);

        let deserialized: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, deserialized);
    }
}
