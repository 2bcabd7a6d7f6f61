//! Restart/replay request construction. The interception itself lives in
//! `pipeline::try_restart_substitution`; this module builds the envelope
//! fields a caller sets to trigger it.
//!
//! Two distinct modes: a pure replay re-runs the referenced trace's node
//! outputs by matching `input_md5`, with no operator involvement; an
//! operator override additionally pins one specific node's output for one
//! dispatch, then the override field is consumed so a retried sub-call
//! inside the same restart falls back to hash matching rather than reusing
//! the same forced value indefinitely.

use crate::envelope::OxyRequest;
use crate::value::{query_arguments, ArgValue};

/// Builds the root request for restarting `callee` from `reference_trace_id`,
/// replaying prior node outputs by input hash wherever the new call's
/// arguments match a node already recorded in the referenced trace.
pub fn new_replay_request(
    trace_id: impl Into<String>,
    reference_trace_id: impl Into<String>,
    callee: impl Into<String>,
    query: impl Into<String>,
) -> OxyRequest {
    let mut request = OxyRequest::new_from_user(trace_id, callee);
    request.arguments = query_arguments(query);
    request.reference_trace_id = Some(reference_trace_id.into());
    request.is_load_data_for_restart = true;
    request
}

/// Pins `node_name`'s output for this one dispatch, overriding the normal
/// hash-matched replay lookup. `restart_node_order` bounds which prior nodes
/// are eligible for ordinary hash-based replay alongside the override.
pub fn with_operator_override(
    mut request: OxyRequest,
    node_name: impl Into<String>,
    output: ArgValue,
    restart_node_order: Option<chrono::DateTime<chrono::Utc>>,
) -> OxyRequest {
    request.restart_node_id = Some(node_name.into());
    request.restart_node_output = Some(output);
    request.restart_node_order = restart_node_order;
    request
}

/// Consumes the operator override, if it targets `component_name`, returning
/// the pinned output and leaving the request's override fields cleared so
/// any retry or nested call proceeds through ordinary hash matching.
pub fn take_operator_override(
    request: &mut OxyRequest,
    component_name: &str,
) -> Option<ArgValue> {
    if request.restart_node_id.as_deref() != Some(component_name) {
        return None;
    }
    request.restart_node_id = None;
    // Everything downstream of the override point must execute fresh rather
    // than remain eligible for hash-based replay.
    request.is_load_data_for_restart = false;
    request.restart_node_output.take()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_replay_request_sets_restart_fields() {
        let req = new_replay_request("t2", "t1", "master_agent", "again");
        assert_eq!(req.reference_trace_id.as_deref(), Some("t1"));
        assert!(req.is_load_data_for_restart);
    }

    #[test]
    fn operator_override_is_consumed_on_matching_take() {
        let req = new_replay_request("t2", "t1", "master_agent", "again");
        let mut req = with_operator_override(req, "calculator", ArgValue::string("42"), None);

        let first = take_operator_override(&mut req, "calculator");
        assert_eq!(first.as_ref().and_then(ArgValue::as_str), Some("42"));

        let second = take_operator_override(&mut req, "calculator");
        assert!(second.is_none());
    }

    #[test]
    fn operator_override_ignores_non_matching_component() {
        let req = new_replay_request("t2", "t1", "master_agent", "again");
        let mut req = with_operator_override(req, "calculator", ArgValue::string("42"), None);
        assert!(take_operator_override(&mut req, "other_tool").is_none());
        // Still available for the component it actually targets.
        assert!(take_operator_override(&mut req, "calculator").is_some());
    }
}
