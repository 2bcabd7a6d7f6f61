//! Parallel fan-out: dispatches identical arguments to every permitted
//! callee under one shared `parallel_id`, then aggregates. `ParallelAgent`
//! aggregates via a summarisation LLM call; `ParallelFlow` concatenates
//! deterministically.
//!
//! Grounded on `loom::channels::topic::Topic`'s fan-out broadcast primitive
//! combined with the DAG runner in `loom::agent::got`, which dispatches a
//! node's successors concurrently and joins before the next step.

use async_trait::async_trait;

use crate::envelope::{OxyRequest, OxyResponse, OxyState};
use crate::error::OxyError;
use crate::llm::messages_argument;
use crate::mas::Mas;
use crate::memory::{Message, Role};
use crate::registry::Behaviour;
use crate::value::ArgValue;

/// Runs `request.arguments` against every permitted callee of `request.callee`
/// under a shared parallel group, returning each callee's name alongside its
/// response. A failing sibling does not cancel the others.
async fn fan_out(mas: &Mas, request: &OxyRequest) -> Result<Vec<(String, OxyResponse)>, OxyError> {
    let component = mas
        .registry
        .get(&request.callee)
        .ok_or_else(|| OxyError::ComponentNotFound(request.callee.clone()))?;

    let mut callees: Vec<&String> = component
        .spec
        .permitted_callees
        .iter()
        .chain(component.spec.extra_permitted_callees.iter())
        .collect();
    callees.sort();

    let parallel_id = request.node_id.clone();
    let futures = callees.iter().map(|callee| {
        let child = request.call_in_parallel_group(
            (*callee).clone(),
            request.arguments.clone(),
            Some(parallel_id.clone()),
        );
        async move { crate::pipeline::execute(mas, child).await }
    });
    let results = futures::future::join_all(futures).await;

    callees
        .into_iter()
        .cloned()
        .zip(results)
        .map(|(name, result)| match result {
            Ok(response) => Ok((name, response)),
            Err(err) => Ok((
                name,
                OxyResponse::failed(err.to_string(), request.clone()),
            )),
        })
        .collect()
}

fn response_text(response: &OxyResponse) -> String {
    response.output.as_str().unwrap_or_default().to_string()
}

/// Aggregates sibling outputs through a summarisation LLM call, so the
/// caller sees one synthesised answer instead of a raw list of fragments.
pub struct ParallelAgent {
    pub llm_model: String,
}

impl ParallelAgent {
    pub fn new(llm_model: impl Into<String>) -> Self {
        ParallelAgent {
            llm_model: llm_model.into(),
        }
    }
}

#[async_trait]
impl Behaviour for ParallelAgent {
    async fn execute_inner(
        &self,
        mas: &Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError> {
        let results = fan_out(mas, request).await?;

        let query = request.get_arg_str("query").unwrap_or_default();
        let mut transcript = format!("Original request: {query}\n\nResults from each branch:\n");
        for (name, response) in &results {
            transcript.push_str(&format!("- {name} ({:?}): {}\n", response.state, response_text(response)));
        }

        let messages = vec![Message {
            role: Role::User,
            content: format!(
                "Synthesise a single answer from the branch results below.\n\n{transcript}"
            ),
        }];
        let child = request.call(self.llm_model.clone(), messages_argument(&messages));
        let summary = crate::pipeline::execute(mas, child).await?;
        if summary.state != OxyState::Completed {
            return Err(OxyError::RuntimeFailure(
                "summarisation call did not complete".to_string(),
            ));
        }
        Ok(OxyResponse::completed(summary.output, request.clone()))
    }
}

/// Aggregates sibling outputs by deterministic string concatenation, each
/// branch's output on its own line prefixed with the branch's name.
pub struct ParallelFlow;

#[async_trait]
impl Behaviour for ParallelFlow {
    async fn execute_inner(
        &self,
        mas: &Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError> {
        let results = fan_out(mas, request).await?;
        let joined = results
            .iter()
            .map(|(name, response)| format!("{name}: {}", response_text(response)))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(OxyResponse::completed(ArgValue::string(joined), request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockLlm;
    use crate::llm::LlmBehaviour;
    use crate::registry::{Component, ComponentKind, ComponentSpec};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl Behaviour for Echo {
        async fn execute_inner(
            &self,
            _mas: &Mas,
            request: &OxyRequest,
        ) -> Result<OxyResponse, OxyError> {
            let text = request.get_arg_str("query").unwrap_or_default().to_string();
            Ok(OxyResponse::completed(ArgValue::string(text), request.clone()))
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl Behaviour for AlwaysFails {
        async fn execute_inner(
            &self,
            _mas: &Mas,
            request: &OxyRequest,
        ) -> Result<OxyResponse, OxyError> {
            Err(OxyError::RuntimeFailure("boom".to_string()))
        }
    }

    async fn register_echo_branches(mas: &Mas) {
        mas.register(Component::new(
            ComponentSpec::new("branch_a", ComponentKind::Tool),
            Arc::new(Echo),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("branch_b", ComponentKind::Tool),
            Arc::new(Echo),
        ))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn parallel_flow_concatenates_all_branch_outputs() {
        let mas = Mas::bootstrap();
        register_echo_branches(&mas).await;
        mas.register(Component::new(
            ComponentSpec::new("fanout", ComponentKind::Flow).with_permitted_callees([
                "branch_a".to_string(),
                "branch_b".to_string(),
            ]),
            Arc::new(ParallelFlow),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("fanout", "go").await.unwrap();
        let text = response.output.as_str().unwrap();
        assert!(text.contains("branch_a: go"));
        assert!(text.contains("branch_b: go"));
    }

    #[tokio::test]
    async fn parallel_flow_includes_a_failed_sibling_without_aborting_others() {
        let mas = Mas::bootstrap();
        register_echo_branches(&mas).await;
        mas.register(Component::new(
            ComponentSpec::new("broken", ComponentKind::Tool),
            Arc::new(AlwaysFails),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("fanout", ComponentKind::Flow).with_permitted_callees([
                "branch_a".to_string(),
                "broken".to_string(),
            ]),
            Arc::new(ParallelFlow),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("fanout", "go").await.unwrap();
        let text = response.output.as_str().unwrap();
        assert!(text.contains("branch_a: go"));
        assert!(text.contains("broken:"));
    }

    #[tokio::test]
    async fn parallel_agent_summarises_branch_results_via_llm() {
        let mas = Mas::bootstrap();
        register_echo_branches(&mas).await;
        mas.register(Component::new(
            ComponentSpec::new("llm1", ComponentKind::Llm),
            Arc::new(LlmBehaviour::new(Arc::new(MockLlm::new(vec![
                "synthesised answer".to_string(),
            ])))),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("fanout", ComponentKind::Agent).with_permitted_callees([
                "branch_a".to_string(),
                "branch_b".to_string(),
            ]),
            Arc::new(ParallelAgent::new("llm1")),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("fanout", "go").await.unwrap();
        assert_eq!(response.output.as_str(), Some("synthesised answer"));
    }
}
