//! Single-file JSON-document store backend for local, single-process
//! deployments. Grounded on `loom::memory::sqlite_saver::SqliteSaver`'s role
//! as a persistent checkpoint backend, but implemented as a flat JSON
//! document per index with atomic rewrite: whole-index granularity,
//! last-writer-wins, no concurrent-writer coordination beyond a process-local
//! lock.

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

use super::{HistoryRecord, HistoryStore, MessageStore, NodeRecord, NodeStore, TraceStore};

#[derive(Default, Serialize, Deserialize)]
struct Document {
    nodes: BTreeMap<String, NodeRecord>,
    traces: BTreeMap<String, Vec<String>>,
    history: BTreeMap<String, Vec<HistoryRecord>>,
    messages: BTreeMap<String, Vec<(u64, serde_json::Value)>>,
}

/// A single JSON document on disk holding all three indices, guarded by an
/// in-process lock and rewritten atomically (write to a sibling temp file,
/// then rename) on every mutation.
pub struct FsStores {
    path: PathBuf,
    doc: RwLock<Document>,
}

impl FsStores {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = if path.exists() {
            let bytes = std::fs::read(&path)
                .map_err(|e| StoreError::Storage(format!("reading {}: {e}", path.display())))?;
            serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?
        } else {
            Document::default()
        };
        Ok(FsStores {
            path,
            doc: RwLock::new(doc),
        })
    }

    fn persist(&self, doc: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp_path = tmp_path_for(&self.path);
        {
            let mut tmp = std::fs::File::create(&tmp_path)
                .map_err(|e| StoreError::Storage(format!("creating temp file: {e}")))?;
            tmp.write_all(&bytes)
                .map_err(|e| StoreError::Storage(format!("writing temp file: {e}")))?;
        }
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| StoreError::Storage(format!("renaming into place: {e}")))?;
        Ok(())
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[async_trait]
impl NodeStore for FsStores {
    async fn pre_save(&self, record: NodeRecord) -> Result<(), StoreError> {
        let mut doc = self
            .doc
            .write()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        doc.nodes.insert(record.node_id.clone(), record);
        self.persist(&doc)
    }

    async fn post_save(&self, record: NodeRecord) -> Result<(), StoreError> {
        self.pre_save(record).await
    }

    async fn get_by_node_id(&self, node_id: &str) -> Result<Option<NodeRecord>, StoreError> {
        let doc = self
            .doc
            .read()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        Ok(doc.nodes.get(node_id).cloned())
    }

    async fn find_by_trace_and_hash(
        &self,
        trace_id: &str,
        input_md5: &str,
    ) -> Result<Option<NodeRecord>, StoreError> {
        let doc = self
            .doc
            .read()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        Ok(doc
            .nodes
            .values()
            .find(|r| r.trace_id == trace_id && r.input_md5 == input_md5)
            .cloned())
    }

    async fn find_latest_by_trace_and_name(
        &self,
        trace_id: &str,
        component_name: &str,
    ) -> Result<Option<NodeRecord>, StoreError> {
        let doc = self
            .doc
            .read()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        Ok(doc
            .nodes
            .values()
            .filter(|r| r.trace_id == trace_id && r.call_stack.last().map(String::as_str) == Some(component_name))
            .max_by_key(|r| r.update_time)
            .cloned())
    }
}

#[async_trait]
impl TraceStore for FsStores {
    async fn record_root_chain(
        &self,
        trace_id: &str,
        root_trace_ids: &[String],
    ) -> Result<(), StoreError> {
        let mut doc = self
            .doc
            .write()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        doc.traces
            .insert(trace_id.to_string(), root_trace_ids.to_vec());
        self.persist(&doc)
    }

    async fn get_root_chain(&self, trace_id: &str) -> Result<Option<Vec<String>>, StoreError> {
        let doc = self
            .doc
            .read()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        Ok(doc.traces.get(trace_id).cloned())
    }
}

#[async_trait]
impl HistoryStore for FsStores {
    async fn append(
        &self,
        session_name: &str,
        _trace_id: &str,
        record: HistoryRecord,
    ) -> Result<(), StoreError> {
        let mut doc = self
            .doc
            .write()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        doc.history
            .entry(session_name.to_string())
            .or_default()
            .push(record);
        self.persist(&doc)
    }

    async fn recent(
        &self,
        session_name: &str,
        allowed_trace_ids: &[String],
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, StoreError> {
        let doc = self
            .doc
            .read()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        let Some(records) = doc.history.get(session_name) else {
            return Ok(Vec::new());
        };
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
impl MessageStore for FsStores {
    async fn append(
        &self,
        trace_id: &str,
        seq: u64,
        event: serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut doc = self
            .doc
            .write()
            .map_err(|_| StoreError::Storage("document lock poisoned".into()))?;
        doc.messages
            .entry(trace_id.to_string())
            .or_default()
            .push((seq, event));
        self.persist(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(node_id: &str, trace_id: &str, hash: &str) -> NodeRecord {
        let now = chrono::Utc::now();
        NodeRecord {
            node_id: node_id.to_string(),
            trace_id: trace_id.to_string(),
            input_md5: hash.to_string(),
            call_stack: vec![],
            pre_node_ids: vec![],
            state: crate::envelope::OxyState::Running,
            output: None,
            extra: BTreeMap::new(),
            create_time: now,
            update_time: now,
        }
    }

    #[tokio::test]
    async fn reopening_the_document_preserves_prior_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = FsStores::open(&path).unwrap();
            store.pre_save(node("n1", "t1", "h1")).await.unwrap();
        }

        let reopened = FsStores::open(&path).unwrap();
        let fetched = reopened.get_by_node_id("n1").await.unwrap().unwrap();
        assert_eq!(fetched.trace_id, "t1");
    }

    #[tokio::test]
    async fn persist_leaves_no_stray_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FsStores::open(&path).unwrap();
        store.pre_save(node("n1", "t1", "h1")).await.unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
    }
}
