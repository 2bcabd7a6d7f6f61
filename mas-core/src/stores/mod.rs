//! Trace/node/history/message stores.
//!
//! Grounded on `loom::memory::checkpointer::Checkpointer` (an async trait
//! keyed by thread/namespace with a `put`/`get_tuple`/`list` shape) and
//! `loom::memory::in_memory_store::InMemoryStore`/`sqlite_saver::SqliteSaver`
//! (an in-memory default plus a single-file persistent backend). MAS needs
//! four distinct append-oriented indices instead of one checkpoint table, so
//! each gets its own small trait rather than overloading `Checkpointer`.

mod fs;
mod memory;
mod records;

pub use fs::FsStores;
pub use memory::MemoryStores;
pub use records::{HistoryRecord, NodeRecord, TraceRecord};

use async_trait::async_trait;

use crate::envelope::OxyState;
use crate::error::StoreError;

/// Append-or-update-by-id store for node records. Writers must tolerate concurrent writes;
/// last-writer-wins on update.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Stage 6: persist the initial `RUNNING` record. Dispatched concurrently
    /// by the pipeline; its completion is awaited before stage 12's write.
    async fn pre_save(&self, record: NodeRecord) -> Result<(), StoreError>;

    /// Stage 12: overwrite with the completed record (state/output/extra/update_time).
    async fn post_save(&self, record: NodeRecord) -> Result<(), StoreError>;

    async fn get_by_node_id(&self, node_id: &str) -> Result<Option<NodeRecord>, StoreError>;

    /// Restart lookup: find a prior node in
    /// `trace_id` whose `input_md5` matches. Matching is by hash, not node
    /// id, so agents may reorder tool calls across replays.
    async fn find_by_trace_and_hash(
        &self,
        trace_id: &str,
        input_md5: &str,
    ) -> Result<Option<NodeRecord>, StoreError>;

    /// Dispatch-time restart setup: the most recently updated record in
    /// `trace_id` whose call stack names `component_name` as the callee,
    /// used to derive `restart_node_order` from that node's `update_time`
    /// instead of requiring an operator to supply it by hand.
    async fn find_latest_by_trace_and_name(
        &self,
        trace_id: &str,
        component_name: &str,
    ) -> Result<Option<NodeRecord>, StoreError>;
}

/// Append-oriented store for trace-level bookkeeping: the root-trace chain
/// used by multi-turn memory continuity.
#[async_trait]
pub trait TraceStore: Send + Sync {
    async fn record_root_chain(
        &self,
        trace_id: &str,
        root_trace_ids: &[String],
    ) -> Result<(), StoreError>;

    async fn get_root_chain(&self, trace_id: &str) -> Result<Option<Vec<String>>, StoreError>;
}

/// Per-session (`caller__callee`) history of completed user-level turns.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(
        &self,
        session_name: &str,
        trace_id: &str,
        record: HistoryRecord,
    ) -> Result<(), StoreError>;

    /// Returns the last `limit` records for `session_name` whose trace id is
    /// in `allowed_trace_ids`,
    /// oldest-first so callers can emit them as alternating turns directly.
    async fn recent(
        &self,
        session_name: &str,
        allowed_trace_ids: &[String],
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, StoreError>;
}

/// Append-only store for bus events, keyed by `(trace_id, seq)`. Persistence here is optional and governed by a global flag at the
/// call site; the store itself just appends.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(
        &self,
        trace_id: &str,
        seq: u64,
        event: serde_json::Value,
    ) -> Result<(), StoreError>;
}

/// Builds a `NodeRecord` in the `RUNNING` state for stage 6's pre-save.
pub fn running_node_record(
    node_id: String,
    trace_id: String,
    input_md5: String,
    call_stack: Vec<String>,
    pre_node_ids: Vec<String>,
) -> NodeRecord {
    let now = chrono::Utc::now();
    NodeRecord {
        node_id,
        trace_id,
        input_md5,
        call_stack,
        pre_node_ids,
        state: OxyState::Running,
        output: None,
        extra: Default::default(),
        create_time: now,
        update_time: now,
    }
}
