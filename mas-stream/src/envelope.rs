//! Envelope (trace_id, node_id, seq) applied to every bus event on the wire.
//! [`EnvelopeState`] tracks the running sequence number for one trace and
//! injects the envelope into each event as it is serialized.

use crate::event::BusEvent;
use serde_json::Value;

/// Envelope fields applied to every wire message: which trace, which node
/// produced it, and its position in that trace's event sequence.
#[derive(Clone, Debug, Default)]
pub struct Envelope {
    pub trace_id: Option<String>,
    pub node_id: Option<String>,
    pub seq: Option<u64>,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    /// Merges envelope fields into the given JSON object (top-level only).
    /// Does not overwrite keys the event payload already set.
    pub fn inject_into(&self, obj: &mut Value) {
        let Some(obj) = obj.as_object_mut() else {
            return;
        };
        if let Some(ref id) = self.trace_id {
            obj.entry("trace_id")
                .or_insert_with(|| Value::String(id.clone()));
        }
        if let Some(ref id) = self.node_id {
            obj.entry("node_id")
                .or_insert_with(|| Value::String(id.clone()));
        }
        if let Some(seq) = self.seq {
            obj.entry("seq")
                .or_insert_with(|| Value::Number(serde_json::Number::from(seq)));
        }
    }
}

/// Per-trace envelope state: carries the trace id and the next sequence number.
/// One instance lives for the lifetime of a trace's bus queue.
pub struct EnvelopeState {
    pub trace_id: String,
    pub next_seq: u64,
}

impl EnvelopeState {
    pub fn new(trace_id: String) -> Self {
        Self {
            trace_id,
            next_seq: 0,
        }
    }

    /// Injects the envelope into the event value and advances the sequence counter.
    pub fn inject_into(&mut self, node_id: &str, value: &mut Value) {
        let env = Envelope::new()
            .with_trace_id(&self.trace_id)
            .with_node_id(node_id)
            .with_seq(self.next_seq);
        self.next_seq += 1;
        env.inject_into(value);
    }
}

/// Converts a bus event to JSON and injects the envelope for the given node.
pub fn to_json(
    event: &BusEvent,
    node_id: &str,
    state: &mut EnvelopeState,
) -> Result<Value, serde_json::Error> {
    let mut value = event.to_value()?;
    state.inject_into(node_id, &mut value);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{BusEvent, BusValue};

    #[test]
    fn envelope_inject_does_not_overwrite_existing_keys() {
        let mut obj = serde_json::json!({"type":"msg","node_id":"original"});
        let env = Envelope::new()
            .with_trace_id("t1")
            .with_node_id("n2")
            .with_seq(3);
        env.inject_into(&mut obj);
        assert_eq!(obj["node_id"], "original");
        assert_eq!(obj["trace_id"], "t1");
        assert_eq!(obj["seq"], 3);
    }

    #[test]
    fn to_json_injects_trace_and_increments_seq() {
        let ev = BusEvent::Msg {
            node_id: "n1".into(),
            text: "hi".into(),
        };
        let mut state = EnvelopeState::new("trace-abc".to_string());
        let v1 = to_json(&ev, "n1", &mut state).unwrap();
        let v2 = to_json(&ev, "n1", &mut state).unwrap();
        assert_eq!(v1["trace_id"], "trace-abc");
        assert_eq!(v1["seq"], 0);
        assert_eq!(v2["seq"], 1);
        let _ = BusValue::Null;
    }
}
