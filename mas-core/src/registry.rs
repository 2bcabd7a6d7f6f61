//! Component model: `Oxy` flattened into a tagged `ComponentKind` plus a
//! `Behaviour` strategy object. Grounded on `loom::traits::Agent` (a `name()` +
//! `run(state) -> state` trait) and `loom::graph::Node` (id + run + optional
//! context-aware run); generalised to the five kinds and the extra
//! lifecycle/config fields every component carries.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::envelope::{OxyRequest, OxyResponse};
use crate::error::OxyError;

/// The five component kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Llm,
    Tool,
    Agent,
    Flow,
    RemoteAgent,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Llm => "llm",
            ComponentKind::Tool => "tool",
            ComponentKind::Agent => "agent",
            ComponentKind::Flow => "flow",
            ComponentKind::RemoteAgent => "remote_agent",
        }
    }
}

/// Behavioural strategy for one component. The 13-stage pipeline (`crate::pipeline`) owns everything
/// else; a `Behaviour` only supplies the kind-specific stage-10 core and the
/// optional hooks lists on `Oxy`.
#[async_trait]
pub trait Behaviour: Send + Sync {
    /// One-shot setup; may discover subordinate components (e.g. MCP tool
    /// enumeration, team clones). Must be idempotent.
    async fn init(&self, _mas: &crate::mas::Mas) -> Result<(), OxyError> {
        Ok(())
    }

    /// The kind-specific core of stage 10. Receives the
    /// envelope after pre-processing/formatting, plus the MAS handle so
    /// composite agents (ReAct, ParallelAgent, ...) can dispatch sub-calls
    /// to their permitted callees; `mas` is a transient parameter here, the
    /// same as in `init`, never stored on the behaviour itself. Returns the
    /// raw output that stage 11 onward will post-process and persist.
    async fn execute_inner(
        &self,
        mas: &crate::mas::Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError>;

    /// Releases any held resources (subprocesses, connections) on MAS
    /// shutdown. Idempotent and must not panic.
    async fn cleanup(&self) {}

    /// Stage 2 hook: mutate the request before logging/hashing.
    fn process_input(&self, request: &mut OxyRequest) {
        let _ = request;
    }

    /// Stage 7 hook: reshape `arguments` right before execution (e.g. prompt
    /// templating).
    fn format_input(&self, request: &mut OxyRequest) {
        let _ = request;
    }

    /// Stage 11 hook: mutate the response after execution, before persistence.
    fn process_output(&self, response: &mut OxyResponse) {
        let _ = response;
    }

    /// Stage 13 hook: reshape the final output right before it's sent
    /// upstream (e.g. trimming, formatting for display).
    fn format_output(&self, response: &mut OxyResponse) {
        let _ = response;
    }
}

/// Static configuration for one component. Carries everything
/// the pipeline needs that isn't behavioural: identity, permissions,
/// concurrency/timeout/retry policy, and persistence flags.
#[derive(Clone)]
pub struct ComponentSpec {
    pub name: String,
    pub kind: ComponentKind,
    pub class_name: String,
    pub desc: String,
    pub desc_for_llm: String,
    pub input_schema: serde_json::Value,
    pub is_permission_required: bool,
    pub permitted_callees: HashSet<String>,
    pub extra_permitted_callees: HashSet<String>,
    pub semaphore_limit: usize,
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
    pub is_save_data: bool,
    pub is_send_tool_call: bool,
    pub friendly_error_text: Option<String>,
}

impl ComponentSpec {
    /// Defaults mirroring the per-kind concurrency posture documented in
    /// DESIGN.md.
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        let semaphore_limit = match kind {
            ComponentKind::Llm => 4,
            _ => 16,
        };
        ComponentSpec {
            name: name.into(),
            kind,
            class_name: String::new(),
            desc: String::new(),
            desc_for_llm: String::new(),
            input_schema: serde_json::json!({}),
            is_permission_required: false,
            permitted_callees: HashSet::new(),
            extra_permitted_callees: HashSet::new(),
            semaphore_limit,
            timeout: Duration::from_secs(60),
            retries: 0,
            retry_delay: Duration::from_millis(500),
            is_save_data: true,
            is_send_tool_call: true,
            friendly_error_text: None,
        }
    }

    pub fn with_permitted_callees(mut self, callees: impl IntoIterator<Item = String>) -> Self {
        self.permitted_callees = callees.into_iter().collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32, retry_delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_semaphore_limit(mut self, limit: usize) -> Self {
        assert!(limit >= 1, "semaphore_limit must be >= 1");
        self.semaphore_limit = limit;
        self
    }

    pub fn is_callee_permitted(&self, callee: &str) -> bool {
        self.permitted_callees.contains(callee) || self.extra_permitted_callees.contains(callee)
    }
}

/// A registered component: static spec plus its behaviour object, plus the
/// per-component semaphore enforcing `semaphore_limit`.
pub struct Component {
    pub spec: ComponentSpec,
    pub behaviour: Arc<dyn Behaviour>,
    pub semaphore: Arc<tokio::sync::Semaphore>,
}

impl Component {
    pub fn new(spec: ComponentSpec, behaviour: Arc<dyn Behaviour>) -> Arc<Self> {
        let semaphore = Arc::new(tokio::sync::Semaphore::new(spec.semaphore_limit));
        Arc::new(Component {
            spec,
            behaviour,
            semaphore,
        })
    }
}

/// The component registry: written only at startup, read-only
/// after the first dispatch. `dashmap` matches `loom`'s own choice for
/// concurrently-read shared maps (its tool/session maps).
#[derive(Default)]
pub struct Registry {
    components: DashMap<String, Arc<Component>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            components: DashMap::new(),
        }
    }

    /// Registers a component. Rejects re-registration under the same name
    /// without a silent replace.
    pub fn register(&self, component: Arc<Component>) -> Result<(), OxyError> {
        let name = component.spec.name.clone();
        match self.components.entry(name.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(OxyError::DuplicateRegistration(name))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(component);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Component>> {
        self.components.get(name).map(|entry| entry.value().clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.components.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubBehaviour;

    #[async_trait]
    impl Behaviour for StubBehaviour {
        async fn execute_inner(
            &self,
            _mas: &crate::mas::Mas,
            request: &OxyRequest,
        ) -> Result<OxyResponse, OxyError> {
            Ok(OxyResponse::completed(
                crate::value::ArgValue::string("ok"),
                request.clone(),
            ))
        }
    }

    fn stub(name: &str) -> Arc<Component> {
        Component::new(
            ComponentSpec::new(name, ComponentKind::Tool),
            Arc::new(StubBehaviour),
        )
    }

    /// Registering the same name twice is rejected, not silently replaced.
    #[test]
    fn duplicate_registration_rejected() {
        let registry = Registry::new();
        registry.register(stub("echo")).unwrap();
        let err = registry.register(stub("echo")).unwrap_err();
        assert!(matches!(err, OxyError::DuplicateRegistration(n) if n == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    #[should_panic(expected = "semaphore_limit must be >= 1")]
    fn semaphore_limit_zero_rejected() {
        let _ = ComponentSpec::new("x", ComponentKind::Tool).with_semaphore_limit(0);
    }
}
