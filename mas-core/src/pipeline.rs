//! The fixed stage sequence every component execution passes through,
//! regardless of kind. Grounded on `loom::graph::Graph::run_node`, the
//! single choke point for logging, checkpointing, and invoking a node's
//! `run`, generalised into explicit numbered stages so permission checks,
//! restart interception, and bus events all happen in one place instead of
//! being re-implemented per component kind.

use std::time::Duration;

use tracing::{info, warn};

use crate::bus::Bus;
use crate::envelope::{OxyRequest, OxyResponse, OxyState};
use crate::error::OxyError;
use crate::hash::input_md5;
use crate::mas::Mas;
use crate::registry::Component;
use crate::stores::running_node_record;
use crate::value::ArgValue;
use mas_stream::BusEvent;
use std::sync::Arc;

/// Runs `request` against the registered component named by `request.callee`
/// through the full stage sequence, returning its final response.
///
/// Stages, in order: (1) resolve + permission check, (2) pre-process hook,
/// (3) pre-log, (4) input hashing, (5) restart interception, (6) pre-save,
/// (7) format-input hook, (8) pre-send bus event, (9) semaphore-gated
/// execute with timeout/retry, (10) post-process hook, (11) post-save,
/// (12) format-output hook, (13) post-send bus event + friendly-error
/// substitution.
pub async fn execute(mas: &Mas, mut request: OxyRequest) -> Result<OxyResponse, OxyError> {
    // Stage 1: resolve + permission check.
    let component = mas
        .registry
        .get(&request.callee)
        .ok_or_else(|| OxyError::ComponentNotFound(request.callee.clone()))?;
    if !is_permitted(&component, &request) {
        return Ok(OxyResponse::skipped(
            format!("No permission for tool: {}", request.callee),
            request,
        ));
    }
    push_call_stack(&mut request, &component);

    // Stage 2: pre-process hook.
    component.behaviour.process_input(&mut request);

    // Stage 3: pre-log.
    info!(
        trace_id = %request.current_trace_id,
        node_id = %request.node_id,
        callee = %request.callee,
        "dispatching"
    );

    // Stage 4: input hashing.
    request.input_md5 = input_md5(&request.arguments);

    // Stage 5: restart interception. Only llm/tool leaves are eligible for
    // cache substitution — an agent/flow node replayed from cache would skip
    // re-running its children, breaking the chain underneath it.
    let restart_eligible = matches!(
        component.spec.kind,
        crate::registry::ComponentKind::Llm | crate::registry::ComponentKind::Tool
    );
    if restart_eligible {
        if let Some(output) =
            crate::restart::take_operator_override(&mut request, &component.spec.name)
        {
            return Ok(OxyResponse::completed(output, request));
        }
        if let Some(substituted) = try_restart_substitution(mas, &request).await? {
            return Ok(substituted);
        }
    }

    // Stage 6: pre-save.
    mas.stores
        .nodes
        .pre_save(running_node_record(
            request.node_id.clone(),
            request.current_trace_id.clone(),
            request.input_md5.clone(),
            request.call_stack.clone(),
            request.pre_node_ids.clone(),
        ))
        .await?;

    // Stage 7: format-input hook.
    component.behaviour.format_input(&mut request);

    // Stage 8: pre-send bus event.
    if component.spec.is_send_tool_call {
        mas.bus.publish(
            &request.current_trace_id,
            &request.node_id,
            BusEvent::ToolCall {
                node_id: request.node_id.clone(),
                callee: request.callee.clone(),
                arguments: mas_stream::BusValue::from_json(&request.arguments_as_json()),
            },
        )?;
    }

    // Stage 9: semaphore-gated execute with timeout/retry.
    let mut response = execute_with_retry(mas, &component, &request).await;

    // Stage 10: post-process hook.
    if let Ok(ref mut response) = response {
        component.behaviour.process_output(response);
    }

    let mut response = match response {
        Ok(response) => response,
        Err(err) => OxyResponse::failed(err.to_string(), request.clone()),
    };

    // Stage 11: post-save.
    let mut record = running_node_record(
        request.node_id.clone(),
        request.current_trace_id.clone(),
        request.input_md5.clone(),
        request.call_stack.clone(),
        request.pre_node_ids.clone(),
    );
    record.state = response.state;
    record.output = Some(response.output.clone());
    mas.stores.nodes.post_save(record).await?;

    // Stage 12: format-output hook.
    component.behaviour.format_output(&mut response);

    // Stage 13: post-send bus event + friendly-error substitution.
    if component.spec.is_send_tool_call {
        let event = if response.state == OxyState::Completed && request.caller_category == "user"
        {
            BusEvent::Answer {
                node_id: request.node_id.clone(),
                output: mas_stream::BusValue::from_json(&response.output.to_json()),
            }
        } else {
            BusEvent::Observation {
                node_id: request.node_id.clone(),
                callee: request.callee.clone(),
                output: mas_stream::BusValue::from_json(&response.output.to_json()),
            }
        };
        mas.bus.publish(&request.current_trace_id, &request.node_id, event)?;
    }

    Ok(response.with_friendly_error(component.spec.friendly_error_text.as_deref()))
}

fn is_permitted(component: &Arc<Component>, request: &OxyRequest) -> bool {
    if !component.spec.is_permission_required {
        return true;
    }
    if request.caller_category == crate::envelope::USER_CATEGORY {
        return true;
    }
    component.spec.is_callee_permitted(&request.caller)
}

fn push_call_stack(request: &mut OxyRequest, component: &Arc<Component>) {
    if request.node_id.is_empty() {
        request.node_id = uuid::Uuid::new_v4().to_string();
    }
    request.call_stack.push(component.spec.name.clone());
    request.node_id_stack.push(request.node_id.clone());
}

async fn try_restart_substitution(
    mas: &Mas,
    request: &OxyRequest,
) -> Result<Option<OxyResponse>, OxyError> {
    let Some(reference_trace_id) = request.reference_trace_id.as_deref() else {
        return Ok(None);
    };
    if !request.is_load_data_for_restart {
        return Ok(None);
    }
    let input_md5 = input_md5(&request.arguments);
    let Some(prior) = mas
        .stores
        .nodes
        .find_by_trace_and_hash(reference_trace_id, &input_md5)
        .await?
    else {
        return Ok(None);
    };
    if let Some(cutoff) = request.restart_node_order {
        if prior.update_time >= cutoff {
            // Equal-to-cutoff is the operator-override injection point, already
            // handled above; strictly-newer means this node postdates the
            // replay reference and must execute fresh.
            return Ok(None);
        }
    }
    let Some(output) = prior.output else {
        return Ok(None);
    };
    warn!(
        trace_id = %request.current_trace_id,
        reference_trace_id,
        "replaying prior node output instead of re-executing"
    );
    Ok(Some(OxyResponse {
        state: prior.state,
        output,
        extra: Default::default(),
        oxy_request: request.clone(),
    }))
}

async fn execute_with_retry(
    mas: &Mas,
    component: &Arc<Component>,
    request: &OxyRequest,
) -> Result<OxyResponse, OxyError> {
    let mut attempt = 0;
    loop {
        let permit = component
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| OxyError::Canceled)?;

        let outcome = tokio::time::timeout(
            component.spec.timeout,
            component.behaviour.execute_inner(mas, request),
        )
        .await;
        drop(permit);

        match outcome {
            Ok(Ok(response)) => return Ok(response),
            Ok(Err(err)) if attempt < component.spec.retries => {
                attempt += 1;
                warn!(callee = %component.spec.name, attempt, error = %err, "retrying after failure");
                tokio::time::sleep(component.spec.retry_delay).await;
                continue;
            }
            Ok(Err(err)) => return Err(err),
            Err(_elapsed) if attempt < component.spec.retries => {
                attempt += 1;
                warn!(callee = %component.spec.name, attempt, "retrying after timeout");
                tokio::time::sleep(component.spec.retry_delay).await;
                continue;
            }
            Err(_elapsed) => return Err(OxyError::Timeout(component.spec.name.clone())),
        }
    }
}

impl OxyRequest {
    /// JSON rendering of `arguments` for bus events, which carry an untyped
    /// payload rather than the envelope's typed `ArgValue`.
    pub fn arguments_as_json(&self) -> serde_json::Value {
        ArgValue::Map(self.arguments.clone()).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Behaviour, ComponentKind, ComponentSpec};
    use crate::value::query_arguments;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingFailThenSucceed {
        calls: AtomicU32,
        fail_times: u32,
    }

    #[async_trait]
    impl Behaviour for CountingFailThenSucceed {
        async fn execute_inner(&self, _mas: &Mas, request: &OxyRequest) -> Result<OxyResponse, OxyError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_times {
                return Err(OxyError::RuntimeFailure("not yet".into()));
            }
            Ok(OxyResponse::completed(ArgValue::string("done"), request.clone()))
        }
    }

    #[tokio::test]
    async fn retries_until_success_within_budget() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("flaky", ComponentKind::Tool)
                .with_retries(2, Duration::from_millis(1)),
            Arc::new(CountingFailThenSucceed {
                calls: AtomicU32::new(0),
                fail_times: 2,
            }),
        ))
        .await
        .unwrap();

        let mut request = OxyRequest::new_from_user("t1", "flaky");
        request.arguments = query_arguments("go");
        let response = execute(&mas, request).await.unwrap();
        assert_eq!(response.state, OxyState::Completed);
    }

    #[tokio::test]
    async fn exhausting_retries_returns_failure() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("flaky", ComponentKind::Tool)
                .with_retries(1, Duration::from_millis(1)),
            Arc::new(CountingFailThenSucceed {
                calls: AtomicU32::new(0),
                fail_times: 5,
            }),
        ))
        .await
        .unwrap();

        let mut request = OxyRequest::new_from_user("t1", "flaky");
        request.arguments = query_arguments("go");
        let response = execute(&mas, request).await.unwrap();
        assert_eq!(response.state, OxyState::Failed);
    }

    struct Echo;

    #[async_trait]
    impl Behaviour for Echo {
        async fn execute_inner(&self, _mas: &Mas, request: &OxyRequest) -> Result<OxyResponse, OxyError> {
            Ok(OxyResponse::completed(
                ArgValue::string(request.get_arg_str("query").unwrap_or_default()),
                request.clone(),
            ))
        }
    }

    #[tokio::test]
    async fn permission_required_skips_unlisted_caller_without_failing_it() {
        let mut spec = ComponentSpec::new("secret_tool", ComponentKind::Tool);
        spec.is_permission_required = true;

        let mas = Mas::bootstrap();
        mas.register(Component::new(spec, Arc::new(Echo))).await.unwrap();

        let mut request = OxyRequest::new_from_user("t1", "secret_tool");
        request.caller = "other_agent".to_string();
        request.caller_category = "agent".to_string();

        let response = execute(&mas, request).await.unwrap();
        assert_eq!(response.state, OxyState::Skipped);
        assert_eq!(
            response.output.as_str(),
            Some("No permission for tool: secret_tool")
        );
    }

    #[tokio::test]
    async fn agent_kind_is_never_served_from_restart_cache() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("planner", ComponentKind::Agent),
            Arc::new(Echo),
        ))
        .await
        .unwrap();

        let mut request = OxyRequest::new_from_user("t2", "planner");
        request.arguments = query_arguments("go");
        request.reference_trace_id = Some("t1".to_string());
        request.is_load_data_for_restart = true;

        mas.stores
            .nodes
            .pre_save(crate::stores::running_node_record(
                "n1".to_string(),
                "t1".to_string(),
                input_md5(&request.arguments),
                vec![],
                vec![],
            ))
            .await
            .unwrap();
        let mut cached = crate::stores::running_node_record(
            "n1".to_string(),
            "t1".to_string(),
            input_md5(&request.arguments),
            vec![],
            vec![],
        );
        cached.state = OxyState::Completed;
        cached.output = Some(ArgValue::string("stale cached answer"));
        mas.stores.nodes.post_save(cached).await.unwrap();

        let response = execute(&mas, request).await.unwrap();
        assert_eq!(response.output.as_str(), Some("go"));
    }
}
