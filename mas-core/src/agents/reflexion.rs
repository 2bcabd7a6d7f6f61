//! Reflexion agent: a worker produces an answer, an evaluator critiques it,
//! and the worker retries with the critique appended until the evaluator is
//! satisfied or `max_reflexion_rounds` is exhausted.
//!
//! Grounded on `loom::agent::tot::{expand, evaluate}`'s generate/evaluate
//! tree-of-thought step, collapsed into a single worker/evaluator loop since
//! reflexion only ever keeps its best candidate rather than branching.

use async_trait::async_trait;
use serde::Deserialize;

use crate::envelope::{OxyRequest, OxyResponse, OxyState};
use crate::error::OxyError;
use crate::llm::messages_argument;
use crate::mas::Mas;
use crate::memory::{Message, Role};
use crate::registry::Behaviour;
use crate::value::ArgValue;

const DEFAULT_MAX_REFLEXION_ROUNDS: u32 = 4;

#[derive(Debug, Deserialize)]
struct Evaluation {
    satisfactory: bool,
    #[serde(default)]
    critique: String,
}

fn extract_json<T: for<'de> Deserialize<'de>>(text: &str) -> Option<T> {
    let candidate = if let Some(start) = text.find("```json") {
        let after = &text[start + "```json".len()..];
        let end = after.find("```")?;
        after[..end].trim()
    } else {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }
        &text[start..=end]
    };
    serde_json::from_str(candidate).ok()
}

/// A worker/evaluator loop. `math_mode` swaps the default evaluation prompt
/// for one that checks numeric correctness rather than general quality,
/// matching the dedicated math-reflexion variant.
pub struct Reflexion {
    pub worker_llm: String,
    pub evaluator_llm: String,
    pub max_reflexion_rounds: u32,
    pub math_mode: bool,
}

impl Reflexion {
    pub fn new(worker_llm: impl Into<String>, evaluator_llm: impl Into<String>) -> Self {
        Reflexion {
            worker_llm: worker_llm.into(),
            evaluator_llm: evaluator_llm.into(),
            max_reflexion_rounds: DEFAULT_MAX_REFLEXION_ROUNDS,
            math_mode: false,
        }
    }

    pub fn math_variant(worker_llm: impl Into<String>, evaluator_llm: impl Into<String>) -> Self {
        let mut reflexion = Reflexion::new(worker_llm, evaluator_llm);
        reflexion.math_mode = true;
        reflexion
    }

    async fn call(&self, mas: &Mas, request: &OxyRequest, model: &str, prompt: String) -> Result<String, OxyError> {
        let messages = vec![Message {
            role: Role::User,
            content: prompt,
        }];
        let child = request.call(model.to_string(), messages_argument(&messages));
        let response = crate::pipeline::execute(mas, child).await?;
        if response.state != OxyState::Completed {
            return Err(OxyError::RuntimeFailure(format!(
                "{model} call did not complete"
            )));
        }
        Ok(response.output.as_str().unwrap_or_default().to_string())
    }

    async fn evaluate(
        &self,
        mas: &Mas,
        request: &OxyRequest,
        query: &str,
        answer: &str,
    ) -> Result<Evaluation, OxyError> {
        let criterion = if self.math_mode {
            "Check whether the numeric answer is correct for the question."
        } else {
            "Check whether the answer fully and correctly addresses the question."
        };
        let raw = self
            .call(
                mas,
                request,
                &self.evaluator_llm,
                format!(
                    "{criterion}\n\nQuestion: {query}\nAnswer: {answer}\n\n\
                     Respond with JSON: {{\"satisfactory\": true|false, \"critique\": \"...\"}}."
                ),
            )
            .await?;
        extract_json(&raw).ok_or_else(|| {
            OxyError::SchemaValidation("evaluator did not return JSON".to_string())
        })
    }
}

#[async_trait]
impl Behaviour for Reflexion {
    async fn execute_inner(
        &self,
        mas: &Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError> {
        let query = request.get_arg_str("query").unwrap_or_default().to_string();
        let mut critique: Option<String> = None;
        let mut last_answer = String::new();

        for _ in 0..self.max_reflexion_rounds {
            let prompt = match &critique {
                None => query.clone(),
                Some(critique) => format!(
                    "Question: {query}\n\nYour previous answer was: {last_answer}\n\
                     A reviewer said: {critique}\n\nProvide an improved answer."
                ),
            };
            last_answer = self.call(mas, request, &self.worker_llm, prompt).await?;

            match self.evaluate(mas, request, &query, &last_answer).await {
                Ok(evaluation) if evaluation.satisfactory => {
                    return Ok(OxyResponse::completed(
                        ArgValue::string(last_answer),
                        request.clone(),
                    ));
                }
                Ok(evaluation) => critique = Some(evaluation.critique),
                Err(_) => break,
            }
        }

        // Bound exhausted (or the evaluator never produced parseable
        // feedback): fall back to the worker's last answer rather than
        // failing the whole call.
        Ok(OxyResponse::completed(ArgValue::string(last_answer), request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockLlm;
    use crate::llm::LlmBehaviour;
    use crate::mas::Mas;
    use crate::registry::{Component, ComponentKind, ComponentSpec};
    use std::sync::Arc;

    async fn register_llm(mas: &Mas, name: &str, responses: Vec<String>) {
        mas.register(Component::new(
            ComponentSpec::new(name, ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(MockLlm::new(responses)))),
        ))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn returns_after_exactly_one_round_when_first_evaluation_is_satisfactory() {
        let mas = Mas::bootstrap();
        register_llm(&mas, "worker", vec!["42".to_string()]).await;
        register_llm(
            &mas,
            "evaluator",
            vec![r#"{"satisfactory": true, "critique": ""}"#.to_string()],
        )
        .await;
        mas.register(Component::new(
            ComponentSpec::new("reflexion", ComponentKind::Agent),
            Arc::new(Reflexion::new("worker", "evaluator")),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("reflexion", "what is 6*7").await.unwrap();
        assert_eq!(response.output.as_str(), Some("42"));
    }

    #[tokio::test]
    async fn retries_with_critique_until_satisfactory() {
        let mas = Mas::bootstrap();
        register_llm(&mas, "worker", vec!["41".to_string(), "42".to_string()]).await;
        register_llm(
            &mas,
            "evaluator",
            vec![
                r#"{"satisfactory": false, "critique": "off by one"}"#.to_string(),
                r#"{"satisfactory": true, "critique": ""}"#.to_string(),
            ],
        )
        .await;
        mas.register(Component::new(
            ComponentSpec::new("reflexion", ComponentKind::Agent),
            Arc::new(Reflexion::new("worker", "evaluator")),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("reflexion", "what is 6*7").await.unwrap();
        assert_eq!(response.output.as_str(), Some("42"));
    }

    #[tokio::test]
    async fn exhausting_rounds_without_satisfaction_falls_back_to_last_answer() {
        let mas = Mas::bootstrap();
        register_llm(&mas, "worker", vec!["still wrong".to_string()]).await;
        register_llm(
            &mas,
            "evaluator",
            vec![r#"{"satisfactory": false, "critique": "nope"}"#.to_string()],
        )
        .await;
        let mut reflexion = Reflexion::new("worker", "evaluator");
        reflexion.max_reflexion_rounds = 2;
        mas.register(Component::new(
            ComponentSpec::new("reflexion", ComponentKind::Agent),
            Arc::new(reflexion),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("reflexion", "what is 6*7").await.unwrap();
        assert_eq!(response.output.as_str(), Some("still wrong"));
    }
}
