//! LLM client abstraction: a provider-agnostic `LlmClient` trait, a mock for
//! tests, and a multimodal-normalisation helper shared by every adapter.
//!
//! Grounded on `loom::llm::traits::LlmClient` (an async `chat` trait object
//! `loom` agents hold as `Arc<dyn LlmClient>`) and `loom::llm::MockLlm`
//! (a scripted-response stand-in used across `loom`'s own test suite).

pub mod mock;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;

use crate::envelope::{OxyRequest, OxyResponse};
use crate::error::{LlmError, OxyError};
use crate::mas::Mas;
use crate::memory::{Message, Role};
use crate::registry::Behaviour;
use crate::value::{ArgValue, Arguments};

/// One completion from a provider: the visible answer text, plus any
/// `<think>...</think>` preamble the provider emitted separately so callers can route it to a `think` bus event instead of
/// treating it as part of the answer.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub text: String,
    pub think: Option<String>,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<Completion, LlmError>;
}

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Splits a raw provider response into `(think, answer)` when it begins with
/// a `<think>...</think>` block. Text before the block or after a missing
/// close tag is treated as ordinary answer content rather than dropped.
pub fn split_think_prefix(raw: &str) -> Completion {
    let trimmed = raw.trim_start();
    if let Some(rest) = trimmed.strip_prefix(THINK_OPEN) {
        if let Some(end) = rest.find(THINK_CLOSE) {
            let think = rest[..end].trim().to_string();
            let answer = rest[end + THINK_CLOSE.len()..].trim_start().to_string();
            return Completion {
                text: answer,
                think: Some(think),
            };
        }
    }
    Completion {
        text: raw.to_string(),
        think: None,
    }
}

/// Default byte ceiling for a fetched multimodal resource before it's
/// rejected rather than inlined.
pub const MAX_ATTACHMENT_BYTES: usize = 8 * 1024 * 1024;

/// Resolves an `AttachmentRef` into an inline base64 data value a provider
/// adapter can embed in its request body. Resources over
/// [`MAX_ATTACHMENT_BYTES`] are rejected rather than silently truncated,
/// since a truncated image/video is worse than an explicit error.
pub async fn resolve_attachment(reference: &ArgValue) -> Result<ArgValue, LlmError> {
    let ArgValue::AttachmentRef { uri, media_type } = reference else {
        return Ok(reference.clone());
    };

    let bytes = if let Some(path) = uri.strip_prefix("file://") {
        tokio::fs::read(path)
            .await
            .map_err(|e| LlmError::ResourceFetch(format!("{uri}: {e}")))?
    } else {
        let response = reqwest::get(uri)
            .await
            .map_err(|e| LlmError::ResourceFetch(format!("{uri}: {e}")))?;
        response
            .bytes()
            .await
            .map_err(|e| LlmError::ResourceFetch(format!("{uri}: {e}")))?
            .to_vec()
    };

    if bytes.len() > MAX_ATTACHMENT_BYTES {
        return Err(LlmError::ResourceFetch(format!(
            "{uri} is {} bytes, exceeds the {} byte ceiling",
            bytes.len(),
            MAX_ATTACHMENT_BYTES
        )));
    }

    let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes);
    Ok(ArgValue::String(format!("data:{media_type};base64,{encoded}")))
}

/// Canonical argument key an `Llm`-kind component reads its conversation
/// from. Callers build it with [`messages_argument`].
pub const MESSAGES_KEY: &str = "messages";

/// Serialises a message list into the `arguments` map an `Llm`-kind
/// component's `execute_inner` expects, so callers dispatch through the
/// full pipeline (logging, persistence, retries) rather than calling
/// `LlmClient::complete` directly.
pub fn messages_argument(messages: &[Message]) -> Arguments {
    let list = messages
        .iter()
        .map(|m| {
            ArgValue::Map(
                [
                    ("role".to_string(), ArgValue::string(role_str(m.role))),
                    ("content".to_string(), ArgValue::string(m.content.clone())),
                ]
                .into_iter()
                .collect(),
            )
        })
        .collect();
    [(MESSAGES_KEY.to_string(), ArgValue::List(list))]
        .into_iter()
        .collect()
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn parse_messages(request: &OxyRequest) -> Result<Vec<Message>, OxyError> {
    let Some(ArgValue::List(items)) = request.arguments.get(MESSAGES_KEY) else {
        return Err(OxyError::SchemaValidation(
            "llm component requires a `messages` list argument".to_string(),
        ));
    };
    items
        .iter()
        .map(|item| {
            let map = item.as_map().ok_or_else(|| {
                OxyError::SchemaValidation("each message must be an object".to_string())
            })?;
            let role = match map.get("role").and_then(ArgValue::as_str) {
                Some("assistant") => Role::Assistant,
                _ => Role::User,
            };
            let content = map
                .get("content")
                .and_then(ArgValue::as_str)
                .unwrap_or_default()
                .to_string();
            Ok(Message { role, content })
        })
        .collect()
}

/// Bridges an [`LlmClient`] into the component model: an `Llm`-kind
/// component's `execute_inner` parses `arguments.messages`, calls the
/// client, and emits a `think` bus event when the provider separated a
/// reasoning preamble from its answer.
pub struct LlmBehaviour {
    client: Arc<dyn LlmClient>,
}

impl LlmBehaviour {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        LlmBehaviour { client }
    }
}

#[async_trait]
impl Behaviour for LlmBehaviour {
    async fn execute_inner(
        &self,
        mas: &Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError> {
        let messages = parse_messages(request)?;
        let completion = self.client.complete(&messages).await?;
        if let Some(think) = &completion.think {
            let _ = mas.bus.publish(
                &request.current_trace_id,
                &request.node_id,
                mas_stream::BusEvent::Think {
                    node_id: request.node_id.clone(),
                    text: think.clone(),
                },
            );
        }
        Ok(OxyResponse::completed(
            ArgValue::string(completion.text),
            request.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_think_prefix_separates_think_block_from_answer() {
        let raw = "<think>reasoning here</think>final answer";
        let completion = split_think_prefix(raw);
        assert_eq!(completion.think.as_deref(), Some("reasoning here"));
        assert_eq!(completion.text, "final answer");
    }

    #[test]
    fn split_think_prefix_passes_through_plain_text() {
        let completion = split_think_prefix("just an answer");
        assert!(completion.think.is_none());
        assert_eq!(completion.text, "just an answer");
    }

    #[tokio::test]
    async fn resolve_attachment_passes_through_non_attachment_values() {
        let value = ArgValue::string("plain");
        let resolved = resolve_attachment(&value).await.unwrap();
        assert_eq!(resolved, value);
    }

    #[tokio::test]
    async fn llm_behaviour_dispatches_through_the_pipeline() {
        use crate::registry::{Component, ComponentKind, ComponentSpec};

        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("llm1", ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(mock::MockLlm::new(vec![
                "Hi there!".to_string(),
            ])))),
        ))
        .await
        .unwrap();

        let mut request = OxyRequest::new_from_user("t1", "llm1");
        request.arguments = messages_argument(&[Message {
            role: Role::User,
            content: "hello".to_string(),
        }]);
        let response = crate::pipeline::execute(&mas, request).await.unwrap();
        assert_eq!(response.output.as_str(), Some("Hi there!"));
    }
}
