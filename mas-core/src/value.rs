//! Typed value union for `OxyRequest::arguments` and `shared_data` at the
//! envelope boundary. Components receive parsed-and-validated typed values,
//! not raw JSON; schema validation happens separately, left to the
//! collaborator validating against a component's `input_schema`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// A value flowing through the call envelope.
///
/// `AttachmentRef` models multimodal inputs as an opaque reference rather
/// than inlining bytes into the envelope; an LLM adapter resolves it at
/// send time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
    AttachmentRef { uri: String, media_type: String },
}

impl ArgValue {
    pub fn string(s: impl Into<String>) -> Self {
        ArgValue::String(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ArgValue>> {
        match self {
            ArgValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Converts to `serde_json::Value` for canonical hashing and for
    /// handing to a collaborator expecting raw JSON (e.g. an LLM provider
    /// adaptor).
    pub fn to_json(&self) -> Json {
        match self {
            ArgValue::Null => Json::Null,
            ArgValue::Bool(b) => Json::Bool(*b),
            ArgValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            ArgValue::String(s) => Json::String(s.clone()),
            ArgValue::List(items) => Json::Array(items.iter().map(ArgValue::to_json).collect()),
            ArgValue::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            ArgValue::AttachmentRef { uri, media_type } => serde_json::json!({
                "uri": uri,
                "media_type": media_type,
            }),
        }
    }

    pub fn from_json(value: &Json) -> Self {
        match value {
            Json::Null => ArgValue::Null,
            Json::Bool(b) => ArgValue::Bool(*b),
            Json::Number(n) => ArgValue::Number(n.as_f64().unwrap_or(0.0)),
            Json::String(s) => ArgValue::String(s.clone()),
            Json::Array(items) => ArgValue::List(items.iter().map(ArgValue::from_json).collect()),
            Json::Object(map) => ArgValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), ArgValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

/// `arguments`/`shared_data` map type used throughout the envelope.
pub type Arguments = BTreeMap<String, ArgValue>;

/// Convenience constructor for a single-key `{"query": ...}` arguments map,
/// used by `Mas::chat_with_agent`.
pub fn query_arguments(query: impl Into<String>) -> Arguments {
    let mut map = Arguments::new();
    map.insert("query".to_string(), ArgValue::String(query.into()));
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let original = ArgValue::Map(BTreeMap::from([
            ("a".to_string(), ArgValue::Number(1.0)),
            (
                "b".to_string(),
                ArgValue::List(vec![ArgValue::Bool(true), ArgValue::Null]),
            ),
        ]));
        let json = original.to_json();
        let back = ArgValue::from_json(&json);
        assert_eq!(original, back);
    }

    #[test]
    fn query_arguments_sets_canonical_key() {
        let args = query_arguments("hello");
        assert_eq!(args.get("query").and_then(ArgValue::as_str), Some("hello"));
    }
}
