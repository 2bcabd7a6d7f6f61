//! Call envelope: `OxyRequest`/`OxyResponse`.
//!
//! Grounded on `loom::state::react_state::ReActState` (a mutable value
//! threaded node-to-node) and `loom::graph::run_context::RunContext` (ambient
//! per-run handles); generalised here into the MAS call envelope, which
//! additionally carries trace/permission/restart bookkeeping that
//! single-agent state never needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{ArgValue, Arguments};

/// Lifecycle state of one component execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OxyState {
    Created,
    Running,
    Completed,
    Failed,
    Paused,
    Skipped,
    Canceled,
}

/// Bookkeeping for one parallel-call group sharing a `parallel_id`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ParallelGroup {
    /// Predecessor node ids this group's members all share as `pre_node_ids`.
    pub predecessors: Vec<String>,
    /// Node ids of siblings launched under this group so far.
    pub member_node_ids: Vec<String>,
}

/// The call envelope threaded through every component invocation.
///
/// Mutable through the pipeline: hooks may mutate any field and
/// later stages observe the mutation. Deep-copied on `call` so
/// sibling branches never alias each other's bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OxyRequest {
    // Identity
    pub current_trace_id: String,
    pub from_trace_id: Option<String>,
    pub root_trace_ids: Vec<String>,
    pub node_id: String,
    pub input_md5: String,

    // Routing
    pub caller: String,
    pub callee: String,
    pub caller_category: String,
    pub callee_category: String,
    pub call_stack: Vec<String>,
    pub node_id_stack: Vec<String>,
    pub father_node_id: Option<String>,
    pub pre_node_ids: Vec<String>,
    pub latest_node_ids: Vec<String>,
    pub parallel_id: Option<String>,
    pub parallel_dict: BTreeMap<String, ParallelGroup>,

    // Payload
    pub arguments: Arguments,
    pub shared_data: Arguments,
    pub is_save_history: bool,

    // Restart
    pub reference_trace_id: Option<String>,
    pub restart_node_id: Option<String>,
    pub restart_node_output: Option<ArgValue>,
    pub restart_node_order: Option<chrono::DateTime<chrono::Utc>>,
    pub is_load_data_for_restart: bool,
}

/// Category used for `caller`/`callee_category` and the permission gate.
/// The literal string `"user"` is what the permission check tests against;
/// this type exists so callers don't hand-type the literal everywhere.
pub const USER_CATEGORY: &str = "user";

impl OxyRequest {
    /// Builds the root request for a fresh dispatch from the user
    /// (`Mas::chat_with_agent`).
    pub fn new_from_user(trace_id: impl Into<String>, callee: impl Into<String>) -> Self {
        let trace_id = trace_id.into();
        OxyRequest {
            current_trace_id: trace_id,
            from_trace_id: None,
            root_trace_ids: Vec::new(),
            node_id: String::new(),
            input_md5: String::new(),
            caller: USER_CATEGORY.to_string(),
            callee: callee.into(),
            caller_category: USER_CATEGORY.to_string(),
            callee_category: String::new(),
            call_stack: Vec::new(),
            node_id_stack: Vec::new(),
            father_node_id: None,
            pre_node_ids: Vec::new(),
            latest_node_ids: Vec::new(),
            parallel_id: None,
            parallel_dict: BTreeMap::new(),
            arguments: Arguments::new(),
            shared_data: Arguments::new(),
            is_save_history: true,
            reference_trace_id: None,
            restart_node_id: None,
            restart_node_output: None,
            restart_node_order: None,
            is_load_data_for_restart: false,
        }
    }

    /// `call_stack` and `node_id_stack` must stay the same length, and the
    /// top of `call_stack` must name the current callee.
    pub fn check_stack_invariant(&self) -> bool {
        self.call_stack.len() == self.node_id_stack.len()
            && self
                .call_stack
                .last()
                .map_or(true, |last| *last == self.callee)
    }

    pub fn get_arg_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(ArgValue::as_str)
    }

    /// Builds a nested-call envelope targeting `callee` with fresh
    /// `arguments`, following the same trace and sharing the parent's
    /// restart bookkeeping. Used by composite agents (ReAct, Parallel,
    /// Plan-and-Solve, Reflexion, Workflow) to dispatch sub-calls through
    /// the full pipeline rather than invoking a behaviour directly.
    ///
    /// `node_id` is left empty; the pipeline assigns a fresh one on entry.
    /// `pre_node_ids` is set to the caller's `latest_node_ids` so every
    /// sibling launched from the same parent shares the same predecessor
    /// set (the invariant a parallel fan-out group relies on); callers that
    /// want several siblings to additionally share a `parallel_id` should
    /// pass the same id to each `call` invocation.
    pub fn call(&self, callee: impl Into<String>, arguments: Arguments) -> OxyRequest {
        self.call_in_parallel_group(callee, arguments, None)
    }

    pub fn call_in_parallel_group(
        &self,
        callee: impl Into<String>,
        arguments: Arguments,
        parallel_id: Option<String>,
    ) -> OxyRequest {
        let mut child = self.clone();
        child.callee = callee.into();
        child.caller = self.callee.clone();
        child.caller_category = self.callee_category.clone();
        child.arguments = arguments;
        child.node_id = String::new();
        child.input_md5 = String::new();
        child.father_node_id = Some(self.node_id.clone());
        child.pre_node_ids = self.latest_node_ids.clone();
        child.restart_node_output = None;

        if let Some(pid) = parallel_id {
            child
                .parallel_dict
                .entry(pid.clone())
                .or_insert_with(|| ParallelGroup {
                    predecessors: self.latest_node_ids.clone(),
                    member_node_ids: Vec::new(),
                });
            child.parallel_id = Some(pid);
        } else {
            child.parallel_id = None;
        }

        child
    }
}

/// The outcome of one component execution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OxyResponse {
    pub state: OxyState,
    pub output: ArgValue,
    pub extra: BTreeMap<String, ArgValue>,
    pub oxy_request: OxyRequest,
}

impl OxyResponse {
    pub fn completed(output: ArgValue, oxy_request: OxyRequest) -> Self {
        OxyResponse {
            state: OxyState::Completed,
            output,
            extra: BTreeMap::new(),
            oxy_request,
        }
    }

    pub fn failed(message: impl Into<String>, oxy_request: OxyRequest) -> Self {
        OxyResponse {
            state: OxyState::Failed,
            output: ArgValue::String(message.into()),
            extra: BTreeMap::new(),
            oxy_request,
        }
    }

    pub fn skipped(message: impl Into<String>, oxy_request: OxyRequest) -> Self {
        OxyResponse {
            state: OxyState::Skipped,
            output: ArgValue::String(message.into()),
            extra: BTreeMap::new(),
            oxy_request,
        }
    }

    pub fn canceled(oxy_request: OxyRequest) -> Self {
        OxyResponse {
            state: OxyState::Canceled,
            output: ArgValue::String("canceled".to_string()),
            extra: BTreeMap::new(),
            oxy_request,
        }
    }

    pub fn is_terminal_success(&self) -> bool {
        self.state == OxyState::Completed
    }

    /// Applies `friendly_error_text` over a raw error message, if set.
    pub fn with_friendly_error(mut self, friendly_error_text: Option<&str>) -> Self {
        if self.state == OxyState::Failed {
            if let Some(friendly) = friendly_error_text {
                self.output = ArgValue::String(friendly.to_string());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::query_arguments;

    #[test]
    fn new_from_user_sets_caller_category_user() {
        let req = OxyRequest::new_from_user("trace-1", "master_agent");
        assert_eq!(req.caller_category, USER_CATEGORY);
        assert_eq!(req.callee, "master_agent");
        assert!(req.check_stack_invariant());
    }

    #[test]
    fn friendly_error_replaces_failed_output_only() {
        let req = OxyRequest::new_from_user("t", "c");
        let resp = OxyResponse::failed("boom", req.clone())
            .with_friendly_error(Some("please try again"));
        assert_eq!(resp.output.as_str(), Some("please try again"));

        let ok = OxyResponse::completed(ArgValue::string("fine"), req)
            .with_friendly_error(Some("should not apply"));
        assert_eq!(ok.output.as_str(), Some("fine"));
    }

    #[test]
    fn get_arg_str_reads_query_key() {
        let mut req = OxyRequest::new_from_user("t", "c");
        req.arguments = query_arguments("hi");
        assert_eq!(req.get_arg_str("query"), Some("hi"));
    }

    #[test]
    fn call_sets_caller_to_current_callee_and_clears_node_id() {
        let mut parent = OxyRequest::new_from_user("t", "agent");
        parent.node_id = "agent-node".to_string();
        parent.latest_node_ids = vec!["prior-node".to_string()];

        let child = parent.call("tool_a", query_arguments("go"));
        assert_eq!(child.caller, "agent");
        assert_eq!(child.callee, "tool_a");
        assert!(child.node_id.is_empty());
        assert_eq!(child.father_node_id.as_deref(), Some("agent-node"));
        assert_eq!(child.pre_node_ids, vec!["prior-node".to_string()]);
    }

    #[test]
    fn siblings_in_the_same_parallel_group_share_predecessors() {
        let mut parent = OxyRequest::new_from_user("t", "agent");
        parent.latest_node_ids = vec!["prior-node".to_string()];

        let a = parent.call_in_parallel_group("tool_a", query_arguments("go"), Some("p1".into()));
        let b = parent.call_in_parallel_group("tool_b", query_arguments("go"), Some("p1".into()));
        assert_eq!(a.pre_node_ids, b.pre_node_ids);
        assert_eq!(a.parallel_id.as_deref(), Some("p1"));
    }
}
