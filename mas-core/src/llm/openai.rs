//! OpenAI-compatible chat completion adapter. Grounded on `loom`'s own
//! `async-openai` dependency (carried forward unchanged) and
//! `loom::llm::openai_client`'s style of wrapping `async_openai::Client`
//! behind the crate's own trait rather than exposing the provider type
//! directly.

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;

use crate::error::LlmError;
use crate::memory::{Message, Role};

use super::{split_think_prefix, Completion, LlmClient};

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAiClient {
    /// Builds a client pointed at `base_url` with `api_key`, matching the
    /// `MAS_LLM_BASE_URL`/`MAS_LLM_API_KEY` knobs `mas_config::Env` loads, so
    /// any OpenAI-compatible gateway (not just the official API) works.
    pub fn new(base_url: Option<String>, api_key: String, model: impl Into<String>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base_url) = base_url {
            config = config.with_api_base(base_url);
        }
        OpenAiClient {
            client: Client::with_config(config),
            model: model.into(),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, messages: &[Message]) -> Result<Completion, LlmError> {
        let mut request_messages = Vec::new();
        if let Some(system_prompt) = &self.system_prompt {
            request_messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt.as_str())
                    .build()
                    .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
                    .into(),
            );
        }
        for message in messages {
            let built = match message.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.as_str())
                    .build()
                    .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(message.content.as_str())
                    .build()
                    .map_err(|e| LlmError::InvalidRequest(e.to_string()))?
                    .into(),
            };
            request_messages.push(built);
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::Provider(e.to_string()))?;

        let raw = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(split_think_prefix(&raw))
    }
}
