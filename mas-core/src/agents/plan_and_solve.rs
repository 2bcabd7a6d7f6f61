//! Plan-and-solve agent: a planner drafts a list of steps, an executor runs
//! each step in turn against the agent's permitted callees, and a replanner
//! decides whether to answer or revise the remaining steps, bounded by
//! `max_replan_rounds`.
//!
//! Grounded on `loom::agent::got::{planner, executor, replanner}`, a
//! graph-of-thought planning trio collapsed here into one loop since this
//! crate's agents dispatch through the shared pipeline instead of a compiled
//! graph of nodes.

use async_trait::async_trait;
use serde::Deserialize;

use crate::envelope::{OxyRequest, OxyResponse, OxyState};
use crate::error::OxyError;
use crate::llm::messages_argument;
use crate::mas::Mas;
use crate::memory::{Message, Role};
use crate::registry::Behaviour;
use crate::value::ArgValue;

const DEFAULT_MAX_REPLAN_ROUNDS: u32 = 8;

#[derive(Debug, Deserialize)]
struct Plan {
    steps: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    Response { content: String },
    Plan { steps: Vec<String> },
}

/// A planner/executor/replanner agent. When `pre_plan_steps` is non-empty,
/// planning is skipped and execution starts from it directly.
pub struct PlanAndSolve {
    pub llm_model: String,
    pub executor_callee: String,
    pub pre_plan_steps: Vec<String>,
    pub max_replan_rounds: u32,
}

impl PlanAndSolve {
    pub fn new(llm_model: impl Into<String>, executor_callee: impl Into<String>) -> Self {
        PlanAndSolve {
            llm_model: llm_model.into(),
            executor_callee: executor_callee.into(),
            pre_plan_steps: Vec::new(),
            max_replan_rounds: DEFAULT_MAX_REPLAN_ROUNDS,
        }
    }

    pub fn with_pre_plan_steps(mut self, steps: Vec<String>) -> Self {
        self.pre_plan_steps = steps;
        self
    }

    async fn ask_llm(
        &self,
        mas: &Mas,
        request: &OxyRequest,
        prompt: String,
    ) -> Result<String, OxyError> {
        let messages = vec![Message {
            role: Role::User,
            content: prompt,
        }];
        let child = request.call(self.llm_model.clone(), messages_argument(&messages));
        let response = crate::pipeline::execute(mas, child).await?;
        if response.state != OxyState::Completed {
            return Err(OxyError::RuntimeFailure(
                "planner/replanner call did not complete".to_string(),
            ));
        }
        Ok(response.output.as_str().unwrap_or_default().to_string())
    }

    async fn plan(&self, mas: &Mas, request: &OxyRequest, query: &str) -> Result<Vec<String>, OxyError> {
        let raw = self
            .ask_llm(
                mas,
                request,
                format!(
                    "Break the following task into an ordered list of concrete steps. \
                     Respond with JSON: {{\"steps\": [\"...\"]}}.\n\nTask: {query}"
                ),
            )
            .await?;
        let plan: Plan = extract_json(&raw)
            .ok_or_else(|| OxyError::SchemaValidation("planner did not return JSON".to_string()))?;
        Ok(plan.steps)
    }

    async fn execute_step(
        &self,
        mas: &Mas,
        request: &OxyRequest,
        step: &str,
    ) -> Result<String, OxyError> {
        let child = request.call(
            self.executor_callee.clone(),
            crate::value::query_arguments(step.to_string()),
        );
        let response = crate::pipeline::execute(mas, child).await?;
        Ok(response.output.as_str().unwrap_or_default().to_string())
    }

    async fn replan(
        &self,
        mas: &Mas,
        request: &OxyRequest,
        query: &str,
        completed_steps: &[(String, String)],
        remaining_steps: &[String],
    ) -> Result<Action, OxyError> {
        let history = completed_steps
            .iter()
            .map(|(step, output)| format!("- {step} -> {output}"))
            .collect::<Vec<_>>()
            .join("\n");
        let raw = self
            .ask_llm(
                mas,
                request,
                format!(
                    "Original task: {query}\n\nCompleted steps:\n{history}\n\n\
                     Remaining planned steps: {remaining_steps:?}\n\n\
                     If the task is done, respond with JSON \
                     {{\"action\": \"response\", \"content\": \"<final answer>\"}}. \
                     Otherwise respond with JSON \
                     {{\"action\": \"plan\", \"steps\": [\"...\"]}} naming the remaining steps."
                ),
            )
            .await?;
        extract_json(&raw)
            .ok_or_else(|| OxyError::SchemaValidation("replanner did not return JSON".to_string()))
    }
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

#[async_trait]
impl Behaviour for PlanAndSolve {
    async fn execute_inner(
        &self,
        mas: &Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError> {
        let query = request.get_arg_str("query").unwrap_or_default().to_string();

        let mut remaining = if self.pre_plan_steps.is_empty() {
            self.plan(mas, request, &query).await?
        } else {
            self.pre_plan_steps.clone()
        };

        let mut completed: Vec<(String, String)> = Vec::new();
        let mut last_output = String::new();

        for _ in 0..self.max_replan_rounds {
            if remaining.is_empty() {
                break;
            }
            let step = remaining.remove(0);
            let output = self.execute_step(mas, request, &step).await?;
            last_output = output.clone();
            completed.push((step, output));

            if remaining.is_empty() {
                match self.replan(mas, request, &query, &completed, &remaining).await {
                    Ok(Action::Response { content }) => {
                        return Ok(OxyResponse::completed(ArgValue::string(content), request.clone()));
                    }
                    Ok(Action::Plan { steps }) => remaining = steps,
                    Err(_) => break,
                }
            }
        }

        Ok(OxyResponse::completed(ArgValue::string(last_output), request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockLlm;
    use crate::llm::LlmBehaviour;
    use crate::mas::Mas;
    use crate::registry::{Component, ComponentKind, ComponentSpec};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoExecutor;

    #[async_trait]
    impl Behaviour for EchoExecutor {
        async fn execute_inner(
            &self,
            _mas: &Mas,
            request: &OxyRequest,
        ) -> Result<OxyResponse, OxyError> {
            let text = request.get_arg_str("query").unwrap_or_default();
            Ok(OxyResponse::completed(
                ArgValue::string(format!("did: {text}")),
                request.clone(),
            ))
        }
    }

    #[tokio::test]
    async fn pre_plan_steps_skip_planning_and_run_to_the_replanners_answer() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("llm1", ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(MockLlm::new(vec![
                r#"{"action": "response", "content": "final answer"}"#.to_string(),
            ])))),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("executor", ComponentKind::Tool),
            Arc::new(EchoExecutor),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("planner", ComponentKind::Agent)
                .with_permitted_callees(["executor".to_string()]),
            Arc::new(
                PlanAndSolve::new("llm1", "executor").with_pre_plan_steps(vec!["step one".to_string()]),
            ),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("planner", "do it").await.unwrap();
        assert_eq!(response.output.as_str(), Some("final answer"));
    }

    #[tokio::test]
    async fn empty_pre_plan_steps_with_no_replanner_signal_returns_last_executor_output() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("llm1", ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(MockLlm::new(vec![
                "not json at all".to_string(),
            ])))),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("executor", ComponentKind::Tool),
            Arc::new(EchoExecutor),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("planner", ComponentKind::Agent)
                .with_permitted_callees(["executor".to_string()]),
            Arc::new(
                PlanAndSolve::new("llm1", "executor").with_pre_plan_steps(vec!["step one".to_string()]),
            ),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("planner", "do it").await.unwrap();
        assert_eq!(response.output.as_str(), Some("did: step one"));
    }
}
