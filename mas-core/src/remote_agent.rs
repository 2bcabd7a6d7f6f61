//! Remote agent forwarding: a component whose `execute_inner` dispatches to
//! a peer MAS instance over HTTP instead of running locally, re-emitting the
//! peer's bus events onto this process's bus as they arrive over SSE.
//!
//! Grounded on `loom::openai_sse` (line-based `data: <json>\n\n` framing,
//! used there to produce a stream; used here, on the client side, to
//! consume one) and on this crate's own `mas_stream::BusEvent` wire format,
//! which both ends of the forward share.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::envelope::{OxyRequest, OxyResponse, OxyState};
use crate::error::OxyError;
use crate::mas::Mas;
use crate::registry::Behaviour;
use crate::value::ArgValue;

/// Request body sent to a peer's dispatch endpoint. Call-stack and node-id
/// stacks are forwarded so the peer's own pipeline sees a continuous chain
/// rather than starting a disconnected root trace.
#[derive(Serialize)]
struct ForwardRequest<'a> {
    trace_id: &'a str,
    callee: &'a str,
    caller: &'a str,
    caller_category: &'a str,
    call_stack: &'a [String],
    arguments: serde_json::Value,
}

#[derive(Deserialize)]
struct ForwardResponse {
    state: OxyState,
    output: serde_json::Value,
}

/// A `RemoteAgent`-kind component's behaviour: forwards `execute_inner` to
/// `base_url`'s dispatch endpoint and, concurrently, drains that endpoint's
/// event stream onto the local bus for the same trace.
pub struct RemoteAgentBehaviour {
    client: Client,
    base_url: String,
    remote_callee: String,
}

impl RemoteAgentBehaviour {
    pub fn new(base_url: impl Into<String>, remote_callee: impl Into<String>) -> Self {
        RemoteAgentBehaviour {
            client: Client::new(),
            base_url: base_url.into(),
            remote_callee: remote_callee.into(),
        }
    }

    fn dispatch_url(&self) -> String {
        format!("{}/dispatch", self.base_url.trim_end_matches('/'))
    }

    fn stream_url(&self, trace_id: &str) -> String {
        format!(
            "{}/trace/{trace_id}/events",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Behaviour for RemoteAgentBehaviour {
    async fn execute_inner(&self, _mas: &Mas, request: &OxyRequest) -> Result<OxyResponse, OxyError> {
        let forward = ForwardRequest {
            trace_id: &request.current_trace_id,
            callee: &self.remote_callee,
            caller: &request.caller,
            caller_category: &request.caller_category,
            call_stack: &request.call_stack,
            arguments: request.arguments_as_json(),
        };

        let response = self
            .client
            .post(self.dispatch_url())
            .json(&forward)
            .send()
            .await
            .map_err(|e| OxyError::RuntimeFailure(format!("remote dispatch failed: {e}")))?
            .error_for_status()
            .map_err(|e| OxyError::RuntimeFailure(format!("remote dispatch failed: {e}")))?
            .json::<ForwardResponse>()
            .await
            .map_err(|e| OxyError::RuntimeFailure(format!("decoding remote response: {e}")))?;

        Ok(OxyResponse {
            state: response.state,
            output: ArgValue::from_json(&response.output),
            extra: Default::default(),
            oxy_request: request.clone(),
        })
    }
}

/// Drains a peer's `data: <json>\n\n` event stream for `trace_id` and
/// re-publishes every frame onto `mas`'s local bus under the same trace, so
/// a watcher of the local trace sees the remote agent's progress as if it
/// had run locally. Returns once the peer closes the stream.
pub async fn forward_events(
    mas: &Mas,
    behaviour: &RemoteAgentBehaviour,
    trace_id: &str,
) -> Result<(), OxyError> {
    let response = behaviour
        .client
        .get(behaviour.stream_url(trace_id))
        .send()
        .await
        .map_err(|e| OxyError::RuntimeFailure(format!("remote stream failed: {e}")))?;

    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| OxyError::RuntimeFailure(format!("remote stream read: {e}")))?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(frame_end) = buffer.find("\n\n") {
            let frame = buffer[..frame_end].to_string();
            buffer.drain(..frame_end + 2);
            let Some(payload) = frame.strip_prefix("data: ") else {
                continue;
            };
            let Ok(event) = serde_json::from_str::<serde_json::Value>(payload) else {
                continue;
            };
            if event.get("type").and_then(|t| t.as_str()) == Some("close") {
                return Ok(());
            }
            relay_raw_event(mas, trace_id, event);
        }
    }
    Ok(())
}

fn relay_raw_event(mas: &Mas, trace_id: &str, event: serde_json::Value) {
    let node_id = event
        .get("node_id")
        .and_then(|v| v.as_str())
        .unwrap_or("remote")
        .to_string();
    let text = event
        .get("text")
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(|| event.to_string());
    let _ = mas.bus.publish(
        trace_id,
        &node_id.clone(),
        mas_stream::BusEvent::Msg { node_id, text },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_url_strips_trailing_slash() {
        let behaviour = RemoteAgentBehaviour::new("http://peer:8080/", "remote_master");
        assert_eq!(behaviour.dispatch_url(), "http://peer:8080/dispatch");
    }

    #[test]
    fn stream_url_includes_trace_id() {
        let behaviour = RemoteAgentBehaviour::new("http://peer:8080", "remote_master");
        assert_eq!(
            behaviour.stream_url("t1"),
            "http://peer:8080/trace/t1/events"
        );
    }
}
