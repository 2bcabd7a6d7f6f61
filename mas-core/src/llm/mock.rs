//! Scripted `LlmClient` for deterministic tests. Grounded on `loom::llm::MockLlm`,
//! which cycles through a fixed response list so ReAct-style round-trip tests
//! don't depend on a real provider.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::LlmError;
use crate::memory::Message;

use super::{split_think_prefix, Completion, LlmClient};

/// Returns each entry of `responses` in order, then repeats the last one
/// indefinitely once exhausted (so a test that under-counts calls doesn't
/// panic on an out-of-range index).
pub struct MockLlm {
    responses: Vec<String>,
    calls: AtomicUsize,
}

impl MockLlm {
    pub fn new(responses: Vec<String>) -> Self {
        assert!(!responses.is_empty(), "MockLlm needs at least one scripted response");
        MockLlm {
            responses,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, _messages: &[Message]) -> Result<Completion, LlmError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let raw = &self.responses[index.min(self.responses.len() - 1)];
        Ok(split_think_prefix(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Message, Role};

    #[tokio::test]
    async fn returns_scripted_responses_in_order_then_repeats_last() {
        let mock = MockLlm::new(vec!["first".to_string(), "second".to_string()]);
        let messages = vec![Message {
            role: Role::User,
            content: "hi".to_string(),
        }];

        assert_eq!(mock.complete(&messages).await.unwrap().text, "first");
        assert_eq!(mock.complete(&messages).await.unwrap().text, "second");
        assert_eq!(mock.complete(&messages).await.unwrap().text, "second");
        assert_eq!(mock.call_count(), 3);
    }
}
