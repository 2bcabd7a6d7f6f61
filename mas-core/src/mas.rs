//! The `Mas` facade: the process-wide handle bundling the component
//! registry, stores, and bus, and the entry points callers dispatch through.
//!
//! Grounded on `loom::graph::Graph`, the single entry point owning nodes,
//! checkpointer, and the run loop, generalised to own five kinds of
//! component instead of one node type, and a registry keyed by name instead
//! of a fixed graph topology.

use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::bus::Bus;
use crate::envelope::{OxyRequest, OxyResponse};
use crate::error::OxyError;
use crate::org::{Organization, OrganizationNode};
use crate::pipeline;
use crate::registry::{Component, ComponentKind, Registry};
use crate::stores::{HistoryStore, MemoryStores, MessageStore, NodeStore, TraceStore};
use crate::value::{query_arguments, ArgValue};

/// Bundles the three store traits a pipeline run needs. `MemoryStores`
/// implements all three, so the common case is one `Arc` shared three ways;
/// a deployment wanting mixed backends (e.g. filesystem nodes, in-memory
/// history) can supply three different `Arc`s instead.
pub struct Stores {
    pub nodes: Arc<dyn NodeStore>,
    pub traces: Arc<dyn TraceStore>,
    pub history: Arc<dyn HistoryStore>,
    pub messages: Arc<dyn MessageStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        let backend = Arc::new(MemoryStores::new());
        Stores {
            nodes: backend.clone(),
            traces: backend.clone(),
            history: backend.clone(),
            messages: backend,
        }
    }
}

/// The process-wide orchestration handle. Construct via [`Mas::bootstrap`],
/// register components, then dispatch with [`Mas::chat_with_agent`].
pub struct Mas {
    pub registry: Registry,
    pub stores: Stores,
    pub bus: Bus,
}

impl Mas {
    /// Builds a `Mas` with in-memory stores and the default bus capacity.
    /// Matches `loom::memory::in_memory_store::InMemoryStore::new()`'s
    /// zero-config default, with no further setup required to run a graph.
    pub fn bootstrap() -> Self {
        Mas {
            registry: Registry::new(),
            stores: Stores::in_memory(),
            bus: Bus::default(),
        }
    }

    pub fn with_stores(stores: Stores) -> Self {
        Mas {
            registry: Registry::new(),
            stores,
            bus: Bus::default(),
        }
    }

    /// Builds a `Mas` with in-memory stores and a caller-supplied bus
    /// capacity, for callers reading `Env::bus_capacity` instead of taking
    /// the default.
    pub fn with_bus_capacity(capacity: usize) -> Self {
        Mas {
            registry: Registry::new(),
            stores: Stores::in_memory(),
            bus: Bus::new(capacity),
        }
    }

    /// Registers a component and runs its one-shot `init` hook, wiring it
    /// into the registry before any dispatch can reach it.
    pub async fn register(&self, component: Arc<Component>) -> Result<(), OxyError> {
        component.behaviour.init(self).await?;
        self.registry.register(component)
    }

    /// Dispatches a fresh user query to `callee`, starting a new root-trace
    /// chain. This is the primary external entry point.
    pub async fn chat_with_agent(
        &self,
        callee: &str,
        query: impl Into<String>,
    ) -> Result<OxyResponse, OxyError> {
        self.dispatch(callee, query, None).await
    }

    /// Dispatches a follow-up query to `callee` as a continuation of
    /// `from_trace_id`'s conversation: the new trace's root-trace chain
    /// extends the prior one, so session-keyed short-memory reads (a ReAct
    /// agent's own history lookup, keyed by `root_trace_ids`) see earlier
    /// turns of the same conversation instead of starting over.
    pub async fn chat_continuing(
        &self,
        callee: &str,
        query: impl Into<String>,
        from_trace_id: &str,
    ) -> Result<OxyResponse, OxyError> {
        self.dispatch(callee, query, Some(from_trace_id)).await
    }

    async fn dispatch(
        &self,
        callee: &str,
        query: impl Into<String>,
        from_trace_id: Option<&str>,
    ) -> Result<OxyResponse, OxyError> {
        let trace_id = Uuid::new_v4().to_string();
        let mut request = OxyRequest::new_from_user(trace_id.clone(), callee);
        request.arguments = query_arguments(query);

        request.root_trace_ids = match from_trace_id {
            Some(prior) => {
                let mut chain = self
                    .stores
                    .traces
                    .get_root_chain(prior)
                    .await?
                    .unwrap_or_else(|| vec![prior.to_string()]);
                chain.push(trace_id.clone());
                request.from_trace_id = Some(prior.to_string());
                chain
            }
            None => vec![trace_id.clone()],
        };
        self.stores
            .traces
            .record_root_chain(&trace_id, &request.root_trace_ids)
            .await?;

        let response = pipeline::execute(self, request).await;
        self.bus.close(&trace_id);
        response
    }

    /// Dispatches a restart of `callee` from `reference_trace_id`: nodes
    /// whose input hash matches one already recorded there are replayed
    /// instead of re-executed, up to `restart_node_id` (if given), whose
    /// output is pinned to `restart_node_output` for this one call and whose
    /// recorded `update_time` becomes the cutoff after which every node
    /// executes fresh.
    pub async fn restart_agent(
        &self,
        callee: &str,
        query: impl Into<String>,
        reference_trace_id: &str,
        restart_node_id: Option<&str>,
        restart_node_output: Option<ArgValue>,
    ) -> Result<OxyResponse, OxyError> {
        let trace_id = Uuid::new_v4().to_string();
        let mut request = crate::restart::new_replay_request(
            trace_id.clone(),
            reference_trace_id,
            callee,
            query,
        );
        request.root_trace_ids = vec![trace_id.clone()];

        if let (Some(node_name), Some(output)) = (restart_node_id, restart_node_output) {
            let cutoff = self
                .stores
                .nodes
                .find_latest_by_trace_and_name(reference_trace_id, node_name)
                .await?
                .map(|record| record.update_time);
            request = crate::restart::with_operator_override(request, node_name, output, cutoff);
        }

        self.stores
            .traces
            .record_root_chain(&trace_id, &request.root_trace_ids)
            .await?;

        let response = pipeline::execute(self, request).await;
        self.bus.close(&trace_id);
        response
    }

    /// Dispatches `queries` concurrently against `callee`, one independent
    /// trace per query.
    pub async fn batch(
        &self,
        callee: &str,
        queries: Vec<String>,
    ) -> Vec<Result<OxyResponse, OxyError>> {
        let futures = queries
            .into_iter()
            .map(|query| self.chat_with_agent(callee, query));
        futures::future::join_all(futures).await
    }

    /// Computes the organisation tree rooted at `name`: every component
    /// reachable through `permitted_callees`/`extra_permitted_callees`,
    /// tagged with whether it is a `RemoteAgent` leaf.
    pub fn get_organization(&self, name: &str) -> Option<Organization> {
        let root = self.registry.get(name)?;
        let mut visited = BTreeMap::new();
        build_organization_node(self, &root, &mut visited);
        Some(Organization {
            root: visited.remove(name).expect("root was just inserted"),
        })
    }

    /// Runs every registered component's `cleanup` hook. Idempotent per
    /// component; safe to call more than once during shutdown.
    pub async fn shutdown(&self) {
        for name in self.registry.names() {
            if let Some(component) = self.registry.get(&name) {
                component.behaviour.cleanup().await;
            }
        }
    }
}

fn build_organization_node(
    mas: &Mas,
    component: &Arc<Component>,
    visited: &mut BTreeMap<String, OrganizationNode>,
) {
    if visited.contains_key(&component.spec.name) {
        return;
    }
    // Insert a placeholder first so cycles through permitted_callees terminate.
    visited.insert(
        component.spec.name.clone(),
        OrganizationNode {
            name: component.spec.name.clone(),
            kind: component.spec.kind,
            is_remote: component.spec.kind == ComponentKind::RemoteAgent,
            children: Vec::new(),
        },
    );

    let mut children = Vec::new();
    let mut callee_names: Vec<&String> = component
        .spec
        .permitted_callees
        .iter()
        .chain(component.spec.extra_permitted_callees.iter())
        .collect();
    callee_names.sort();
    for callee in callee_names {
        if let Some(child) = mas.registry.get(callee) {
            build_organization_node(mas, &child, visited);
            children.push(callee.clone());
        }
    }

    if let Some(node) = visited.get_mut(&component.spec.name) {
        node.children = children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Behaviour, ComponentSpec};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Echo;

    #[async_trait]
    impl Behaviour for Echo {
        async fn execute_inner(&self, _mas: &Mas, request: &OxyRequest) -> Result<OxyResponse, OxyError> {
            let text = request.get_arg_str("query").unwrap_or_default().to_string();
            Ok(OxyResponse::completed(ArgValue::string(text), request.clone()))
        }
    }

    #[tokio::test]
    async fn chat_with_agent_dispatches_to_registered_component() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("echo", ComponentKind::Tool),
            Arc::new(Echo),
        ))
        .await
        .unwrap();

        let response = mas.chat_with_agent("echo", "hello").await.unwrap();
        assert_eq!(response.output.as_str(), Some("hello"));
    }

    #[tokio::test]
    async fn chat_with_agent_on_unknown_callee_fails() {
        let mas = Mas::bootstrap();
        let err = mas.chat_with_agent("missing", "hi").await.unwrap_err();
        assert!(matches!(err, OxyError::ComponentNotFound(n) if n == "missing"));
    }

    #[tokio::test]
    async fn organization_tree_includes_permitted_callees() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("tool_a", ComponentKind::Tool),
            Arc::new(Echo),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("agent", ComponentKind::Agent)
                .with_permitted_callees(["tool_a".to_string()]),
            Arc::new(Echo),
        ))
        .await
        .unwrap();

        let org = mas.get_organization("agent").unwrap();
        assert_eq!(org.root.children, vec!["tool_a".to_string()]);
    }

    #[tokio::test]
    async fn batch_runs_all_queries_and_preserves_order() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("echo", ComponentKind::Tool),
            Arc::new(Echo),
        ))
        .await
        .unwrap();

        let results = mas
            .batch("echo", vec!["a".to_string(), "b".to_string()])
            .await;
        assert_eq!(results[0].as_ref().unwrap().output.as_str(), Some("a"));
        assert_eq!(results[1].as_ref().unwrap().output.as_str(), Some("b"));
    }

    #[tokio::test]
    async fn chat_continuing_extends_the_root_trace_chain() {
        let mas = Mas::bootstrap();
        mas.register(Component::new(
            ComponentSpec::new("echo", ComponentKind::Tool),
            Arc::new(Echo),
        ))
        .await
        .unwrap();

        let first = mas.chat_with_agent("echo", "hi").await.unwrap();
        let trace1 = first.oxy_request.current_trace_id.clone();

        let second = mas.chat_continuing("echo", "again", &trace1).await.unwrap();
        let trace2 = second.oxy_request.current_trace_id.clone();
        assert_eq!(second.oxy_request.from_trace_id.as_deref(), Some(trace1.as_str()));
        assert_eq!(second.oxy_request.root_trace_ids, vec![trace1.clone(), trace2.clone()]);

        let chain = mas.stores.traces.get_root_chain(&trace2).await.unwrap().unwrap();
        assert_eq!(chain, second.oxy_request.root_trace_ids);
    }

    struct CountingTool {
        calls: AtomicU32,
        prefix: &'static str,
    }

    #[async_trait]
    impl Behaviour for CountingTool {
        async fn execute_inner(&self, _mas: &Mas, request: &OxyRequest) -> Result<OxyResponse, OxyError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OxyResponse::completed(
                ArgValue::string(format!("{}-{n}", self.prefix)),
                request.clone(),
            ))
        }
    }

    struct TwoStepAgent;

    #[async_trait]
    impl Behaviour for TwoStepAgent {
        async fn execute_inner(&self, mas: &Mas, request: &OxyRequest) -> Result<OxyResponse, OxyError> {
            let r2 = crate::pipeline::execute(mas, request.call("node2_tool", query_arguments("arg2")))
                .await?;
            let r3 = crate::pipeline::execute(mas, request.call("node3_tool", query_arguments("arg3")))
                .await?;
            Ok(OxyResponse::completed(
                ArgValue::string(format!(
                    "{}|{}",
                    r2.output.as_str().unwrap_or_default(),
                    r3.output.as_str().unwrap_or_default()
                )),
                request.clone(),
            ))
        }
    }

    /// Scenario: operator overrides node2's output mid-restart; node3, which
    /// postdates the override point, must re-execute rather than replay.
    #[tokio::test]
    async fn restart_agent_overrides_one_node_and_reexecutes_the_rest_fresh() {
        let mas = Mas::bootstrap();
        let node2 = Arc::new(CountingTool {
            calls: AtomicU32::new(0),
            prefix: "node2",
        });
        let node3 = Arc::new(CountingTool {
            calls: AtomicU32::new(0),
            prefix: "node3",
        });
        mas.register(Component::new(
            ComponentSpec::new("node2_tool", ComponentKind::Tool),
            node2.clone(),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("node3_tool", ComponentKind::Tool),
            node3.clone(),
        ))
        .await
        .unwrap();
        mas.register(Component::new(
            ComponentSpec::new("master", ComponentKind::Agent).with_permitted_callees([
                "node2_tool".to_string(),
                "node3_tool".to_string(),
            ]),
            Arc::new(TwoStepAgent),
        ))
        .await
        .unwrap();

        let first = mas.chat_with_agent("master", "go").await.unwrap();
        assert_eq!(first.output.as_str(), Some("node2-0|node3-0"));
        let trace_id = first.oxy_request.current_trace_id.clone();

        let second = mas
            .restart_agent(
                "master",
                "go",
                &trace_id,
                Some("node2_tool"),
                Some(ArgValue::string("overridden")),
            )
            .await
            .unwrap();

        assert_eq!(second.output.as_str(), Some("overridden|node3-1"));
        assert_eq!(node2.calls.load(Ordering::SeqCst), 1);
        assert_eq!(node3.calls.load(Ordering::SeqCst), 2);
    }
}
