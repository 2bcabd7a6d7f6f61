//! ReAct agent: a build/reason/parse/act loop over an LLM component and a
//! set of permitted tool/sub-agent callees, bounded by `max_react_rounds`,
//! falling back to a single summarisation call when the bound is exhausted
//! without an answer.
//!
//! Grounded on `loom::agent::react::runner::runner`'s think/act/observe loop
//! driven by a mutable `ReActState`; collapsed here into one state-machine
//! function since this crate's agents dispatch through the shared pipeline
//! rather than a compiled graph of nodes.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::envelope::{OxyRequest, OxyResponse, OxyState};
use crate::error::OxyError;
use crate::llm::messages_argument;
use crate::mas::Mas;
use crate::memory::{assemble_weighted, history_to_messages, Message, Role};
use crate::registry::{Behaviour, Component, ComponentKind, ComponentSpec};
use crate::value::{ArgValue, Arguments};

const DEFAULT_MAX_ROUNDS: u32 = 16;

/// One tool call extracted from an LLM response.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub arguments: Arguments,
    /// When set, the ACT stage returns this call's raw observation
    /// immediately as the final answer instead of looping back to REASON.
    pub trust_mode: bool,
}

#[derive(Debug, PartialEq)]
enum ParsedAction {
    Answer(String),
    ToolCalls(Vec<ToolInvocation>),
    ErrorParse(String),
}

#[derive(Deserialize)]
struct RawToolCall {
    tool_name: String,
    #[serde(default)]
    arguments: serde_json::Value,
    #[serde(default)]
    trust_mode: Option<serde_json::Value>,
}

/// Extracts a JSON object embedded in `text`, preferring a ```json fenced
/// block and falling back to the first balanced `{...}` span.
fn extract_json_candidate(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let after = &text[start + "```json".len()..];
        if let Some(end) = after.find("```") {
            return Some(after[..end].trim());
        }
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn looks_like_attempted_tool_call(text: &str) -> bool {
    text.contains("tool_name") && text.contains("arguments") && text.contains('{') && text.contains('}')
}

/// Rejects an empty/whitespace response; the default coaching hook
/// (`func_reflexion`).
fn default_reflexion_check(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        Some("Your response was empty. Provide either a tool call or a final answer.".to_string())
    } else {
        None
    }
}

fn parse_llm_response(raw: &str) -> ParsedAction {
    let Some(candidate) = extract_json_candidate(raw) else {
        if let Some(coaching) = default_reflexion_check(raw) {
            return ParsedAction::ErrorParse(coaching);
        }
        return ParsedAction::Answer(raw.trim().to_string());
    };

    match serde_json::from_str::<RawToolCall>(candidate) {
        Ok(call) => {
            let arguments = match call.arguments {
                serde_json::Value::Object(_) => ArgValue::from_json(&call.arguments)
                    .as_map()
                    .cloned()
                    .unwrap_or_default(),
                _ => Arguments::new(),
            };
            let trust_mode = matches!(call.trust_mode, Some(v) if v != serde_json::Value::Bool(false) && v != serde_json::json!(0));
            ParsedAction::ToolCalls(vec![ToolInvocation {
                tool_name: call.tool_name,
                arguments,
                trust_mode,
            }])
        }
        Err(_) => {
            if serde_json::from_str::<serde_json::Value>(candidate)
                .ok()
                .and_then(|v| v.as_object().cloned())
                .is_some()
            {
                ParsedAction::ErrorParse(
                    "Tool calls must include a `tool_name` field.".to_string(),
                )
            } else if looks_like_attempted_tool_call(raw) {
                ParsedAction::ErrorParse("JSON cannot be parsed".to_string())
            } else if let Some(coaching) = default_reflexion_check(raw) {
                ParsedAction::ErrorParse(coaching)
            } else {
                ParsedAction::Answer(raw.trim().to_string())
            }
        }
    }
}

/// A ReAct agent component's behaviour.
pub struct ReactBehaviour {
    pub llm_model: String,
    pub base_system_prompt: String,
    pub max_react_rounds: u32,
    pub short_memory_size: usize,
    pub token_budget: usize,
    pub history_share: f32,
}

impl ReactBehaviour {
    pub fn new(llm_model: impl Into<String>) -> Self {
        ReactBehaviour {
            llm_model: llm_model.into(),
            base_system_prompt: String::new(),
            max_react_rounds: DEFAULT_MAX_ROUNDS,
            short_memory_size: 10,
            token_budget: 4000,
            history_share: 0.5,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.base_system_prompt = prompt.into();
        self
    }

    pub fn with_max_react_rounds(mut self, rounds: u32) -> Self {
        self.max_react_rounds = rounds;
        self
    }

    fn tools_description(&self, mas: &Mas, component: &Component) -> String {
        let mut names: Vec<&String> = component
            .spec
            .permitted_callees
            .iter()
            .chain(component.spec.extra_permitted_callees.iter())
            .collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| mas.registry.get(name))
            .map(|callee| format!("- {}: {}", callee.spec.name, callee.spec.desc_for_llm))
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn load_short_memory(
        &self,
        mas: &Mas,
        request: &OxyRequest,
    ) -> Result<Vec<Message>, OxyError> {
        let session_name = format!("{}__{}", request.caller, request.callee);
        let records = mas
            .stores
            .history
            .recent(&session_name, &request.root_trace_ids, self.short_memory_size)
            .await?;
        Ok(history_to_messages(&records))
    }

    async fn call_llm(
        &self,
        mas: &Mas,
        request: &OxyRequest,
        messages: &[Message],
    ) -> Result<String, OxyError> {
        let child = request.call(self.llm_model.clone(), messages_argument(messages));
        let response = crate::pipeline::execute(mas, child).await?;
        if response.state != OxyState::Completed {
            return Err(OxyError::RuntimeFailure(format!(
                "llm call to {} did not complete: {:?}",
                self.llm_model, response.state
            )));
        }
        Ok(response.output.as_str().unwrap_or_default().to_string())
    }

    async fn act(
        &self,
        mas: &Mas,
        request: &OxyRequest,
        invocations: &[ToolInvocation],
        parallel_id: &str,
    ) -> Result<Vec<(ToolInvocation, OxyResponse)>, OxyError> {
        let futures = invocations.iter().map(|invocation| {
            let child = request.call_in_parallel_group(
                invocation.tool_name.clone(),
                invocation.arguments.clone(),
                Some(parallel_id.to_string()),
            );
            async move { crate::pipeline::execute(mas, child).await }
        });
        let results = futures::future::join_all(futures).await;
        invocations
            .iter()
            .cloned()
            .zip(results)
            .map(|(invocation, result)| result.map(|response| (invocation, response)))
            .collect()
    }
}

#[async_trait]
impl Behaviour for ReactBehaviour {
    async fn execute_inner(
        &self,
        mas: &Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError> {
        let query = request.get_arg_str("query").unwrap_or_default().to_string();
        let component = mas
            .registry
            .get(&request.callee)
            .ok_or_else(|| OxyError::ComponentNotFound(request.callee.clone()))?;

        let tools_description = self.tools_description(mas, &component);
        let short_memory = self.load_short_memory(mas, request).await?;

        let mut react_memory: Vec<Message> = Vec::new();
        let mut observations: Vec<Message> = Vec::new();

        for round in 0..self.max_react_rounds {
            let mut messages = Vec::new();
            messages.push(Message {
                role: Role::User,
                content: format!(
                    "{}\n\nAvailable tools:\n{}",
                    self.base_system_prompt, tools_description
                ),
            });
            messages.extend(short_memory.iter().cloned());
            messages.push(Message {
                role: Role::User,
                content: query.clone(),
            });
            messages.extend(react_memory.iter().cloned());

            let raw = self.call_llm(mas, request, &messages).await?;

            match parse_llm_response(&raw) {
                ParsedAction::Answer(text) => {
                    return Ok(respond_with_memory(request, text, &react_memory));
                }
                ParsedAction::ErrorParse(coaching) => {
                    react_memory.push(Message {
                        role: Role::Assistant,
                        content: raw,
                    });
                    react_memory.push(Message {
                        role: Role::User,
                        content: coaching,
                    });
                }
                ParsedAction::ToolCalls(invocations) => {
                    let parallel_id = format!("{}-round-{round}", request.node_id);
                    let results = self.act(mas, request, &invocations, &parallel_id).await?;

                    if let Some((_, trusted)) =
                        results.iter().find(|(inv, _)| inv.trust_mode)
                    {
                        return Ok(respond_with_memory(
                            request,
                            trusted.output.as_str().unwrap_or_default().to_string(),
                            &react_memory,
                        ));
                    }

                    let mut observation_lines = Vec::new();
                    for (invocation, response) in &results {
                        let text = response.output.as_str().unwrap_or_default().to_string();
                        observation_lines.push(format!("[{}] {}", invocation.tool_name, text));
                        observations.push(Message {
                            role: Role::User,
                            content: text,
                        });
                    }
                    react_memory.push(Message {
                        role: Role::Assistant,
                        content: raw,
                    });
                    react_memory.push(Message {
                        role: Role::User,
                        content: observation_lines.join("\n"),
                    });
                }
            }
        }

        // Bound exhausted: fall back to a single summarisation call, reusing
        // the weighted memory assembly so a long tool-call history doesn't
        // silently blow the provider's context window.
        let summary_messages = assemble_weighted(
            &short_memory,
            &observations,
            self.token_budget,
            self.history_share,
        );
        let mut fallback_messages = vec![Message {
            role: Role::User,
            content: format!(
                "Answer the user's original question using only the information below. \
                 Question: {query}"
            ),
        }];
        fallback_messages.extend(summary_messages);
        let answer = self.call_llm(mas, request, &fallback_messages).await?;
        Ok(respond_with_memory(request, answer, &react_memory))
    }
}

/// Assembles a ReAct "team": `team_size` independent clones of `template`
/// registered under `{name}_0`, `{name}_1`, ... plus a `ParallelAgent`
/// registered under `name` itself with the clones as its permitted callees,
/// so one dispatch to `name` fans out into `team_size` independent ReAct
/// runs and returns their summarised output.
///
/// A component's `init()` hook runs before it is handed to
/// `Registry::register`, so it has no name to clone under and no way to
/// replace its own registration — self-mutating into a team at `init()` time
/// doesn't fit this crate's append-only registry. This assembly-time helper
/// produces the same externally observable shape instead: the caller
/// registers its returned specs/behaviours in place of registering
/// `template` directly under `name`.
pub fn assemble_team(
    name: impl Into<String>,
    summarising_llm_model: impl Into<String>,
    template: &ReactBehaviour,
    permitted_callees: impl IntoIterator<Item = String>,
    team_size: u32,
) -> Vec<(ComponentSpec, Arc<dyn Behaviour>)> {
    let name = name.into();
    let permitted_callees: Vec<String> = permitted_callees.into_iter().collect();

    let mut assembled = Vec::new();
    let mut clone_names = Vec::new();
    for i in 0..team_size {
        let clone_name = format!("{name}_{i}");
        let spec = ComponentSpec::new(clone_name.clone(), ComponentKind::Agent)
            .with_permitted_callees(permitted_callees.clone());
        let behaviour: Arc<dyn Behaviour> = Arc::new(ReactBehaviour {
            llm_model: template.llm_model.clone(),
            base_system_prompt: template.base_system_prompt.clone(),
            max_react_rounds: template.max_react_rounds,
            short_memory_size: template.short_memory_size,
            token_budget: template.token_budget,
            history_share: template.history_share,
        });
        assembled.push((spec, behaviour));
        clone_names.push(clone_name);
    }

    let team_spec = ComponentSpec::new(name, ComponentKind::Agent).with_permitted_callees(clone_names);
    let team_behaviour: Arc<dyn Behaviour> = Arc::new(super::parallel::ParallelAgent::new(summarising_llm_model));
    assembled.push((team_spec, team_behaviour));
    assembled
}

fn respond_with_memory(
    request: &OxyRequest,
    text: String,
    react_memory: &[Message],
) -> OxyResponse {
    let mut response = OxyResponse::completed(ArgValue::string(text), request.clone());
    let memory_json = serde_json::to_value(react_memory).unwrap_or(serde_json::Value::Null);
    response
        .extra
        .insert("react_memory".to_string(), ArgValue::from_json(&memory_json));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::OxyRequest;
    use crate::llm::mock::MockLlm;
    use crate::llm::LlmBehaviour;
    use crate::registry::{ComponentKind, ComponentSpec};
    use crate::value::ArgValue;
    use std::sync::Arc;

    struct EchoTool;

    #[async_trait]
    impl Behaviour for EchoTool {
        async fn execute_inner(
            &self,
            _mas: &Mas,
            request: &OxyRequest,
        ) -> Result<OxyResponse, OxyError> {
            let text = request.get_arg_str("text").unwrap_or_default();
            Ok(OxyResponse::completed(
                ArgValue::string(format!("Tool [echo] execution result: {text}")),
                request.clone(),
            ))
        }
    }

    #[test]
    fn parses_a_fenced_tool_call() {
        let raw = "```json\n{\"tool_name\":\"echo\",\"arguments\":{\"text\":\"abc\"}}\n```";
        match parse_llm_response(raw) {
            ParsedAction::ToolCalls(calls) => {
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].tool_name, "echo");
            }
            other => panic!("expected tool calls, got {other:?}"),
        }
    }

    #[test]
    fn trust_mode_one_is_treated_as_true() {
        let raw = r#"{"tool_name":"echo","arguments":{"text":"abc"},"trust_mode":1}"#;
        match parse_llm_response(raw) {
            ParsedAction::ToolCalls(calls) => assert!(calls[0].trust_mode),
            other => panic!("expected tool calls, got {other:?}"),
        }
    }

    #[test]
    fn object_without_tool_name_is_an_error_parse() {
        let raw = r#"{"foo":"bar"}"#;
        assert!(matches!(parse_llm_response(raw), ParsedAction::ErrorParse(_)));
    }

    #[test]
    fn plain_text_is_an_answer() {
        assert_eq!(
            parse_llm_response("just chatting"),
            ParsedAction::Answer("just chatting".to_string())
        );
    }

    #[test]
    fn empty_text_is_an_error_parse() {
        assert!(matches!(parse_llm_response("   "), ParsedAction::ErrorParse(_)));
    }

    #[tokio::test]
    async fn trust_mode_tool_call_short_circuits_to_its_raw_observation() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("llm1", ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(MockLlm::new(vec![
                r#"{"tool_name":"echo","arguments":{"text":"abc"},"trust_mode":1}"#.to_string(),
            ])))),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("echo", ComponentKind::Tool),
            Arc::new(EchoTool),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("react", ComponentKind::Agent)
                .with_permitted_callees(["echo".to_string()]),
            Arc::new(ReactBehaviour::new("llm1")),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("react", "say abc").await.unwrap();
        assert_eq!(response.state, OxyState::Completed);
        assert_eq!(
            response.output.as_str(),
            Some("Tool [echo] execution result: abc")
        );
    }

    #[tokio::test]
    async fn bound_of_zero_rounds_never_calls_a_tool_and_falls_back() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("llm1", ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(MockLlm::new(vec![
                "fallback answer".to_string(),
            ])))),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("echo", ComponentKind::Tool),
            Arc::new(EchoTool),
        ))
        .await
        .unwrap();
        let mut react = ReactBehaviour::new("llm1");
        react.max_react_rounds = 0;
        mas.register(Component::new(
            ComponentSpec::new("react", ComponentKind::Agent)
                .with_permitted_callees(["echo".to_string()]),
            Arc::new(react),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("react", "say abc").await.unwrap();
        assert_eq!(response.output.as_str(), Some("fallback answer"));
    }

    #[tokio::test]
    async fn team_of_three_fans_out_and_summarises_through_the_team_name() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("worker_llm", ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(MockLlm::new(vec![
                "worker answer".to_string(),
            ])))),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("summariser_llm", ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(MockLlm::new(vec![
                "summarised team answer".to_string(),
            ])))),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("echo", ComponentKind::Tool),
            Arc::new(EchoTool),
        ))
        .await
        .unwrap();

        let template = ReactBehaviour::new("worker_llm");
        for (spec, behaviour) in assemble_team(
            "researchers",
            "summariser_llm",
            &template,
            ["echo".to_string()],
            3,
        ) {
            mas.register(Component::new(spec, behaviour)).await.unwrap();
        }

        assert!(mas.registry.get("researchers_0").is_some());
        assert!(mas.registry.get("researchers_1").is_some());
        assert!(mas.registry.get("researchers_2").is_some());

        let response = mas.chat_with_agent("researchers", "investigate").await.unwrap();
        assert_eq!(response.output.as_str(), Some("summarised team answer"));
    }
}
