//! Bus-level event types: `{tool_call, observation, think, answer, msg, close}`.
//! Payloads use [`BusValue`], a small typed union that preserves strings, numbers,
//! booleans, nulls, lists and maps over the wire; anything else a
//! producer hands in is rendered as a string rather than dropped.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A message-bus payload value. Mirrors `serde_json::Value`'s shape but is the
/// crate's own type so the wire contract is enforced at construction, not left to whatever
/// `serde_json::to_value` happens to produce for an arbitrary caller type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BusValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<BusValue>),
    Map(BTreeMap<String, BusValue>),
}

impl BusValue {
    /// Converts an arbitrary JSON value into a `BusValue`, preserving structure.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => BusValue::Null,
            Value::Bool(b) => BusValue::Bool(*b),
            Value::Number(n) => BusValue::Number(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => BusValue::String(s.clone()),
            Value::Array(items) => BusValue::List(items.iter().map(BusValue::from_json).collect()),
            Value::Object(map) => BusValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), BusValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Renders any value that isn't already structured JSON-compatible data as a string.
    pub fn from_display(value: impl std::fmt::Display) -> Self {
        BusValue::String(value.to_string())
    }
}

/// One event on the per-trace message bus.
///
/// `ToolCall`/`Observation` frame a component's pre-send/post-send progress;
/// `Answer` is emitted only when the caller is the user; `Think` surfaces a
/// provider's `<think>` prefix; `Msg` is a free-form progress note; `Close`
/// marks end of stream.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusEvent {
    ToolCall {
        node_id: String,
        callee: String,
        arguments: BusValue,
    },
    Observation {
        node_id: String,
        callee: String,
        output: BusValue,
    },
    Think {
        node_id: String,
        text: String,
    },
    Answer {
        node_id: String,
        output: BusValue,
    },
    Msg {
        node_id: String,
        text: String,
    },
    Close,
}

impl BusEvent {
    /// Serializes this event to a JSON object (type + payload only; no envelope).
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_value_from_json_preserves_structure() {
        let json = serde_json::json!({"a": 1, "b": [true, null, "x"]});
        let v = BusValue::from_json(&json);
        match v {
            BusValue::Map(m) => {
                assert!(matches!(m.get("a"), Some(BusValue::Number(n)) if *n == 1.0));
                assert!(matches!(m.get("b"), Some(BusValue::List(_))));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn bus_event_serializes_with_snake_case_tag() {
        let ev = BusEvent::Think {
            node_id: "n1".into(),
            text: "reasoning...".into(),
        };
        let value = ev.to_value().unwrap();
        assert_eq!(value["type"], "think");
        assert_eq!(value["text"], "reasoning...");
    }
}
