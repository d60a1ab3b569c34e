//! Value codec
//!
//! Converts native [`Value`]s to wire JSON and back. Element references travel
//! as single-key objects tagged with the WebElement marker.

use std::collections::BTreeMap;

use super::types::{ElementKey, ElementRef, Value};
use crate::{Error, Result};

/// Wire representation with an explicit element discriminant
///
/// All reserved-key detection happens in [`WireValue::from_json`]. Any object
/// carrying the marker with a string identifier is an element reference, even
/// when it started out as ordinary caller data; the protocol offers no way to
/// tell the two apart.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, kept as parsed
    Number(serde_json::Number),
    /// JSON string
    String(String),
    /// JSON array
    Array(Vec<WireValue>),
    /// Object carrying the element marker; holds the element identifier
    ElementRef(String),
    /// Any other JSON object
    Map(BTreeMap<String, WireValue>),
}

impl WireValue {
    /// Classify a JSON value, checking for the element marker first
    pub fn from_json(json: serde_json::Value, key: ElementKey) -> Self {
        match json {
            serde_json::Value::Object(map) => {
                if let Some(serde_json::Value::String(id)) = map.get(key.as_str()) {
                    return WireValue::ElementRef(id.clone());
                }
                WireValue::Map(
                    map.into_iter()
                        .map(|(k, v)| (k, WireValue::from_json(v, key)))
                        .collect(),
                )
            }
            serde_json::Value::Null => WireValue::Null,
            serde_json::Value::Bool(b) => WireValue::Bool(b),
            serde_json::Value::Number(n) => WireValue::Number(n),
            serde_json::Value::String(s) => WireValue::String(s),
            serde_json::Value::Array(items) => WireValue::Array(
                items.into_iter().map(|v| WireValue::from_json(v, key)).collect(),
            ),
        }
    }

    /// Render as JSON
    pub fn into_json(self, key: ElementKey) -> serde_json::Value {
        match self {
            WireValue::Null => serde_json::Value::Null,
            WireValue::Bool(b) => serde_json::Value::Bool(b),
            WireValue::Number(n) => serde_json::Value::Number(n),
            WireValue::String(s) => serde_json::Value::String(s),
            WireValue::Array(items) => serde_json::Value::Array(
                items.into_iter().map(|v| v.into_json(key)).collect(),
            ),
            WireValue::ElementRef(id) => {
                let mut map = serde_json::Map::new();
                map.insert(key.as_str().to_string(), serde_json::Value::String(id));
                serde_json::Value::Object(map)
            }
            WireValue::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into_json(key))).collect(),
            ),
        }
    }
}

/// Bidirectional codec bound to one element marker dialect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueCodec {
    key: ElementKey,
}

impl ValueCodec {
    /// Create a codec for the given dialect
    pub fn new(key: ElementKey) -> Self {
        Self { key }
    }

    /// Element marker dialect
    pub fn element_key(&self) -> ElementKey {
        self.key
    }

    /// Encode a native value
    ///
    /// Fails with `InvalidArgument` for values without a JSON representation
    /// (NaN and infinities).
    pub fn encode(&self, value: &Value) -> Result<WireValue> {
        Ok(match value {
            Value::Null => WireValue::Null,
            Value::Bool(b) => WireValue::Bool(*b),
            Value::Integer(n) => WireValue::Number((*n).into()),
            Value::Float(n) => WireValue::Number(serde_json::Number::from_f64(*n).ok_or_else(
                || Error::invalid_argument(format!("{} is not representable in JSON", n)),
            )?),
            Value::String(s) => WireValue::String(s.clone()),
            Value::Array(items) => WireValue::Array(
                items.iter().map(|v| self.encode(v)).collect::<Result<_>>()?,
            ),
            Value::Object(map) => WireValue::Map(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), self.encode(v)?)))
                    .collect::<Result<_>>()?,
            ),
            Value::Element(element) => WireValue::ElementRef(element.id().to_string()),
        })
    }

    /// Encode a native value straight to JSON
    pub fn encode_json(&self, value: &Value) -> Result<serde_json::Value> {
        Ok(self.encode(value)?.into_json(self.key))
    }

    /// Encode a positional argument list
    pub fn encode_args(&self, args: &[Value]) -> Result<Vec<serde_json::Value>> {
        args.iter().map(|arg| self.encode_json(arg)).collect()
    }

    /// Decode a wire value
    pub fn decode(&self, wire: WireValue) -> Value {
        match wire {
            WireValue::Null => Value::Null,
            WireValue::Bool(b) => Value::Bool(b),
            WireValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 beyond i64::MAX lands here as well
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            WireValue::String(s) => Value::String(s),
            WireValue::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.decode(v)).collect())
            }
            WireValue::ElementRef(id) => Value::Element(ElementRef::new(id)),
            WireValue::Map(map) => Value::Object(
                map.into_iter().map(|(k, v)| (k, self.decode(v))).collect(),
            ),
        }
    }

    /// Decode a JSON value received from the remote end
    pub fn decode_json(&self, json: serde_json::Value) -> Value {
        self.decode(WireValue::from_json(json, self.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::types::{JSONWIRE_ELEMENT_KEY, W3C_ELEMENT_KEY};
    use serde_json::json;

    fn object(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_round_trip_plain_values() {
        let codec = ValueCodec::default();
        let values = vec![
            Value::Null,
            Value::Bool(true),
            Value::Integer(-42),
            Value::Float(1.5),
            Value::Float(2.0),
            Value::String("hello".to_string()),
            Value::Array(vec![Value::Integer(1), Value::Null, Value::from("x")]),
            object(vec![
                ("a", Value::Integer(1)),
                ("nested", object(vec![("b", Value::from(vec![true, false]))])),
            ]),
        ];

        for value in values {
            let json = codec.encode_json(&value).unwrap();
            assert_eq!(codec.decode_json(json), value);
        }
    }

    #[test]
    fn test_round_trip_element() {
        let codec = ValueCodec::default();
        let element = Value::Element(ElementRef::new("0.123-1"));

        let json = codec.encode_json(&element).unwrap();
        assert_eq!(json, json!({ W3C_ELEMENT_KEY: "0.123-1" }));
        assert_eq!(codec.decode_json(json), element);
    }

    #[test]
    fn test_elements_nested_in_containers() {
        let codec = ValueCodec::default();
        let value = object(vec![(
            "items",
            Value::Array(vec![
                Value::Element(ElementRef::new("e1")),
                Value::Element(ElementRef::new("e2")),
            ]),
        )]);

        let json = codec.encode_json(&value).unwrap();
        assert_eq!(
            json,
            json!({ "items": [{ W3C_ELEMENT_KEY: "e1" }, { W3C_ELEMENT_KEY: "e2" }] })
        );
        assert_eq!(codec.decode_json(json), value);
    }

    #[test]
    fn test_jsonwire_dialect() {
        let codec = ValueCodec::new(ElementKey::JsonWire);
        let json = codec
            .encode_json(&Value::Element(ElementRef::new("7")))
            .unwrap();
        assert_eq!(json, json!({ JSONWIRE_ELEMENT_KEY: "7" }));

        // the other dialect's key is ordinary data here
        let decoded = codec.decode_json(json!({ W3C_ELEMENT_KEY: "7" }));
        assert!(matches!(decoded, Value::Object(_)));
    }

    #[test]
    fn test_marker_wins_over_plain_data() {
        let codec = ValueCodec::default();
        let decoded = codec.decode_json(json!({ W3C_ELEMENT_KEY: "e9", "extra": 1 }));
        assert_eq!(decoded, Value::Element(ElementRef::new("e9")));
    }

    #[test]
    fn test_caller_object_using_marker_becomes_element() {
        let codec = ValueCodec::default();
        let data = object(vec![(W3C_ELEMENT_KEY, Value::from("not-an-element"))]);

        let json = codec.encode_json(&data).unwrap();
        assert_eq!(
            codec.decode_json(json),
            Value::Element(ElementRef::new("not-an-element"))
        );
    }

    #[test]
    fn test_non_string_marker_is_plain_data() {
        let codec = ValueCodec::default();
        let decoded = codec.decode_json(json!({ W3C_ELEMENT_KEY: 5 }));
        assert_eq!(decoded, object(vec![(W3C_ELEMENT_KEY, Value::Integer(5))]));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let codec = ValueCodec::default();
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = codec
                .encode_args(&[Value::Integer(1), Value::Array(vec![Value::Float(n)])])
                .unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }
}
