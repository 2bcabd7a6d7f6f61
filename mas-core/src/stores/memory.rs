//! In-memory store backends, the default bootstrapped by `Mas::bootstrap`.
//! Grounded on `loom::memory::in_memory_store::InMemoryStore` (a `DashMap`
//! keyed by namespace tuple) — the same "no setup, process lifetime only"
//! default.

use std::sync::RwLock;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreError;

use super::{HistoryRecord, HistoryStore, MessageStore, NodeRecord, NodeStore, TraceStore};

#[derive(Default)]
pub struct MemoryStores {
    nodes: DashMap<String, NodeRecord>,
    traces: DashMap<String, Vec<String>>,
    history: DashMap<String, RwLock<Vec<HistoryRecord>>>,
    messages: DashMap<String, RwLock<Vec<(u64, serde_json::Value)>>>,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NodeStore for MemoryStores {
    async fn pre_save(&self, record: NodeRecord) -> Result<(), StoreError> {
        self.nodes.insert(record.node_id.clone(), record);
        Ok(())
    }

    async fn post_save(&self, record: NodeRecord) -> Result<(), StoreError> {
        self.nodes.insert(record.node_id.clone(), record);
        Ok(())
    }

    async fn get_by_node_id(&self, node_id: &str) -> Result<Option<NodeRecord>, StoreError> {
        Ok(self.nodes.get(node_id).map(|e| e.value().clone()))
    }

    async fn find_by_trace_and_hash(
        &self,
        trace_id: &str,
        input_md5: &str,
    ) -> Result<Option<NodeRecord>, StoreError> {
        Ok(self
            .nodes
            .iter()
            .find(|e| e.trace_id == trace_id && e.input_md5 == input_md5)
            .map(|e| e.value().clone()))
    }

    async fn find_latest_by_trace_and_name(
        &self,
        trace_id: &str,
        component_name: &str,
    ) -> Result<Option<NodeRecord>, StoreError> {
        Ok(self
            .nodes
            .iter()
            .filter(|e| e.trace_id == trace_id && e.call_stack.last().map(String::as_str) == Some(component_name))
            .max_by_key(|e| e.update_time)
            .map(|e| e.value().clone()))
    }
}

#[async_trait]
impl TraceStore for MemoryStores {
    async fn record_root_chain(
        &self,
        trace_id: &str,
        root_trace_ids: &[String],
    ) -> Result<(), StoreError> {
        self.traces
            .insert(trace_id.to_string(), root_trace_ids.to_vec());
        Ok(())
    }

    async fn get_root_chain(&self, trace_id: &str) -> Result<Option<Vec<String>>, StoreError> {
        Ok(self.traces.get(trace_id).map(|e| e.value().clone()))
    }
}

#[async_trait]
impl HistoryStore for MemoryStores {
    async fn append(
        &self,
        session_name: &str,
        _trace_id: &str,
        record: HistoryRecord,
    ) -> Result<(), StoreError> {
        self.history
            .entry(session_name.to_string())
            .or_insert_with(|| RwLock::new(Vec::new()))
            .write()
            .map_err(|_| StoreError::Storage("history lock poisoned".into()))?
            .push(record);
        Ok(())
    }

    async fn recent(
        &self,
        session_name: &str,
        allowed_trace_ids: &[String],
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, StoreError> {
        let Some(entry) = self.history.get(session_name) else {
            return Ok(Vec::new());
        };
        let records = entry
            .read()
            .map_err(|_| StoreError::Storage("history lock poisoned".into()))?;
        let filtered: Vec<HistoryRecord> = records
            .iter()
            .filter(|r| allowed_trace_ids.is_empty() || allowed_trace_ids.contains(&r.trace_id))
            .cloned()
            .collect();
        let start = filtered.len().saturating_sub(limit);
        Ok(filtered[start..].to_vec())
    }
}

#[async_trait]
impl MessageStore for MemoryStores {
    async fn append(
        &self,
        trace_id: &str,
        seq: u64,
        event: serde_json::Value,
    ) -> Result<(), StoreError> {
        self.messages
            .entry(trace_id.to_string())
            .or_insert_with(|| RwLock::new(Vec::new()))
            .write()
            .map_err(|_| StoreError::Storage("message lock poisoned".into()))?
            .push((seq, event));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::OxyState;
    use std::collections::BTreeMap;

    fn node(node_id: &str, trace_id: &str, hash: &str) -> NodeRecord {
        let now = chrono::Utc::now();
        NodeRecord {
            node_id: node_id.to_string(),
            trace_id: trace_id.to_string(),
            input_md5: hash.to_string(),
            call_stack: vec![],
            pre_node_ids: vec![],
            state: OxyState::Running,
            output: None,
            extra: BTreeMap::new(),
            create_time: now,
            update_time: now,
        }
    }

    #[tokio::test]
    async fn post_save_overwrites_pre_save_by_node_id() {
        let store = MemoryStores::new();
        store.pre_save(node("n1", "t1", "h1")).await.unwrap();
        let mut completed = node("n1", "t1", "h1");
        completed.state = OxyState::Completed;
        store.post_save(completed).await.unwrap();

        let fetched = store.get_by_node_id("n1").await.unwrap().unwrap();
        assert_eq!(fetched.state, OxyState::Completed);
    }

    #[tokio::test]
    async fn find_by_trace_and_hash_matches_on_both_fields() {
        let store = MemoryStores::new();
        store.pre_save(node("n1", "t1", "h1")).await.unwrap();
        store.pre_save(node("n2", "t1", "h2")).await.unwrap();

        let found = store
            .find_by_trace_and_hash("t1", "h2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.node_id, "n2");

        assert!(store
            .find_by_trace_and_hash("t1", "missing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn history_recent_filters_by_allowed_trace_ids_and_respects_limit() {
        let store = MemoryStores::new();
        for i in 0..5 {
            store
                .append(
                    "user__agent",
                    &format!("t{i}"),
                    HistoryRecord {
                        trace_id: format!("t{i}"),
                        query: format!("q{i}"),
                        answer: format!("a{i}"),
                        extra: Default::default(),
                        create_time: chrono::Utc::now(),
                    },
                )
                .await
                .unwrap();
        }

        let allowed = vec!["t1".to_string(), "t2".to_string(), "t3".to_string(), "t4".to_string()];
        let recent = store.recent("user__agent", &allowed, 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].trace_id, "t3");
        assert_eq!(recent[1].trace_id, "t4");
    }
}
