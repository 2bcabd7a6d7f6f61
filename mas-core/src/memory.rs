//! Conversation memory assembled for an LLM call: recent turns from a
//! session's history plus, for ReAct-style agents, the running scratchpad of
//! tool calls and observations, weighted against a token budget.
//!
//! Grounded on `loom::memory::short_term` (a bounded deque of `Message`,
//! `max_messages`-capped) generalised with the weighted short/react split
//! this system's prompt assembly needs: history gets priority up to a share
//! of the budget, and anything left over goes to the scratchpad; the same
//! weighting is reused to compress a ReAct scratchpad when it grows past the
//! bound, rather than truncating it blindly from the front.

use serde::{Deserialize, Serialize};

use crate::stores::HistoryRecord;

/// One turn in assembled conversation memory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A bounded list of messages, oldest evicted first past `max_messages`.
/// Mirrors `loom::memory::short_term`'s bounded buffer.
#[derive(Debug, Default)]
pub struct Memory {
    messages: Vec<Message>,
    max_messages: usize,
}

impl Memory {
    pub fn new(max_messages: usize) -> Self {
        Memory {
            messages: Vec::new(),
            max_messages: max_messages.max(1),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            let overflow = self.messages.len() - self.max_messages;
            self.messages.drain(0..overflow);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Converts a history store's query/answer pairs into alternating
/// user/assistant turns, oldest first.
pub fn history_to_messages(history: &[HistoryRecord]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2);
    for record in history {
        messages.push(Message {
            role: Role::User,
            content: record.query.clone(),
        });
        messages.push(Message {
            role: Role::Assistant,
            content: record.answer.clone(),
        });
    }
    messages
}

/// Approximates a message's token cost as one token per four characters, the
/// same coarse estimator used when no tokenizer is wired in for the active
/// provider.
fn estimate_tokens(message: &Message) -> usize {
    (message.content.len() / 4).max(1)
}

/// Assembles history and scratchpad messages under a shared token budget:
/// history gets up to `history_share` of the budget (oldest trimmed first if
/// it doesn't fit), and the scratchpad gets whatever remains (oldest trimmed
/// first, since a ReAct loop cares most about its most recent steps).
///
/// This weighting is reused verbatim for ReAct's fallback summarisation when
/// a round budget is exceeded without a final answer: the scratchpad is
/// re-packed under the same rule instead of being hard-truncated.
pub fn assemble_weighted(
    history: &[Message],
    scratchpad: &[Message],
    token_budget: usize,
    history_share: f32,
) -> Vec<Message> {
    let history_budget = ((token_budget as f32) * history_share.clamp(0.0, 1.0)) as usize;

    let trimmed_history = take_from_end_within_budget(history, history_budget);
    let history_spent: usize = trimmed_history.iter().map(|m| estimate_tokens(m)).sum();
    let remaining = token_budget.saturating_sub(history_spent);
    let trimmed_scratchpad = take_from_end_within_budget(scratchpad, remaining);

    trimmed_history
        .into_iter()
        .cloned()
        .chain(trimmed_scratchpad.into_iter().cloned())
        .collect()
}

fn take_from_end_within_budget(messages: &[Message], budget: usize) -> Vec<&Message> {
    let mut spent = 0usize;
    let mut kept: Vec<&Message> = Vec::new();
    for message in messages.iter().rev() {
        let cost = estimate_tokens(message);
        if spent + cost > budget && !kept.is_empty() {
            break;
        }
        spent += cost;
        kept.push(message);
    }
    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: Role, content: &str) -> Message {
        Message {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn memory_evicts_oldest_past_max_messages() {
        let mut memory = Memory::new(2);
        memory.push(msg(Role::User, "a"));
        memory.push(msg(Role::Assistant, "b"));
        memory.push(msg(Role::User, "c"));
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.messages()[0].content, "b");
        assert_eq!(memory.messages()[1].content, "c");
    }

    #[test]
    fn history_to_messages_alternates_user_and_assistant() {
        let history = vec![HistoryRecord {
            trace_id: "t1".to_string(),
            query: "hi".to_string(),
            answer: "hello".to_string(),
            extra: Default::default(),
            create_time: chrono::Utc::now(),
        }];
        let messages = history_to_messages(&history);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
    }

    #[test]
    fn assemble_weighted_keeps_most_recent_scratchpad_when_budget_is_tight() {
        let history = vec![msg(Role::User, &"h".repeat(400))];
        let scratchpad = vec![
            msg(Role::Assistant, &"s1".repeat(20)),
            msg(Role::Assistant, &"s2".repeat(20)),
        ];
        let assembled = assemble_weighted(&history, &scratchpad, 50, 0.5);
        assert!(assembled
            .last()
            .map(|m| m.content.starts_with("s2"))
            .unwrap_or(false));
    }

    #[test]
    fn assemble_weighted_always_keeps_at_least_the_newest_item_per_section() {
        let history = vec![msg(Role::User, &"h".repeat(4000))];
        let scratchpad = vec![msg(Role::Assistant, &"s".repeat(4000))];
        let assembled = assemble_weighted(&history, &scratchpad, 1, 0.5);
        assert_eq!(assembled.len(), 2);
    }
}
