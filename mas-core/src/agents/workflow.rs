//! Workflow agent/flow: wraps a plain function of `(&Mas, &OxyRequest) ->
//! ArgValue` as a component, for callers who want deterministic code in the
//! orchestration graph rather than an LLM-driven pattern.
//!
//! Grounded on `loom::graph::node::FunctionNode`, a thin function-as-node
//! wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::envelope::{OxyRequest, OxyResponse};
use crate::error::OxyError;
use crate::mas::Mas;
use crate::registry::Behaviour;
use crate::value::ArgValue;

type WorkflowFuture<'a> = Pin<Box<dyn Future<Output = Result<ArgValue, OxyError>> + Send + 'a>>;
type WorkflowFn = dyn for<'a> Fn(&'a Mas, &'a OxyRequest) -> WorkflowFuture<'a> + Send + Sync;

/// A component whose entire behaviour is one user-supplied async function.
/// Both `WorkflowAgent` and `WorkflowFlow` are this same wrapper; the two
/// names exist only so a workflow can be registered as either kind, since
/// the distinction between "agent" and "flow" is purely organisational for
/// this component kind.
pub struct Workflow {
    func: Arc<WorkflowFn>,
}

impl Workflow {
    pub fn new<F>(func: F) -> Self
    where
        F: for<'a> Fn(&'a Mas, &'a OxyRequest) -> WorkflowFuture<'a> + Send + Sync + 'static,
    {
        Workflow { func: Arc::new(func) }
    }
}

#[async_trait]
impl Behaviour for Workflow {
    async fn execute_inner(
        &self,
        mas: &Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError> {
        let output = (self.func)(mas, request).await?;
        Ok(OxyResponse::completed(output, request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mas::Mas as MasHandle;
    use crate::registry::{Component, ComponentKind, ComponentSpec};

    #[tokio::test]
    async fn wraps_a_plain_function_as_a_component() {
        let mas = MasHandle::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("double", ComponentKind::Flow),
            Arc::new(Workflow::new(|_mas, request| {
                let text = request.get_arg_str("query").unwrap_or_default().to_string();
                Box::pin(async move { Ok(ArgValue::string(format!("{text}{text}"))) })
            })),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("double", "ab").await.unwrap();
        assert_eq!(response.output.as_str(), Some("abab"));
    }

    #[tokio::test]
    async fn can_dispatch_a_sub_call_through_the_mas_handle_it_receives() {
        struct Echo;

        #[async_trait]
        impl Behaviour for Echo {
            async fn execute_inner(
                &self,
                _mas: &Mas,
                request: &OxyRequest,
            ) -> Result<OxyResponse, OxyError> {
                Ok(OxyResponse::completed(
                    ArgValue::string(request.get_arg_str("query").unwrap_or_default()),
                    request.clone(),
                ))
            }
        }

        let mas = MasHandle::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("inner", ComponentKind::Tool),
            Arc::new(Echo),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("wrapper", ComponentKind::Flow)
                .with_permitted_callees(["inner".to_string()]),
            Arc::new(Workflow::new(|mas, request| {
                let child = request.call("inner", request.arguments.clone());
                Box::pin(async move {
                    let response = crate::pipeline::execute(mas, child).await?;
                    Ok(response.output)
                })
            })),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("wrapper", "hi").await.unwrap();
        assert_eq!(response.output.as_str(), Some("hi"));
    }

    #[tokio::test]
    async fn a_function_error_propagates_as_a_failed_response() {
        let mas = MasHandle::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("boom", ComponentKind::Flow),
            Arc::new(Workflow::new(|_mas, _request| {
                Box::pin(async move { Err(OxyError::RuntimeFailure("kaboom".to_string())) })
            })),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("boom", "x").await.unwrap();
        assert_eq!(response.state, crate::envelope::OxyState::Failed);
    }
}
