use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::envelope::OxyState;
use crate::value::ArgValue;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: String,
    pub trace_id: String,
    pub input_md5: String,
    pub call_stack: Vec<String>,
    pub pre_node_ids: Vec<String>,
    pub state: OxyState,
    pub output: Option<ArgValue>,
    pub extra: BTreeMap<String, ArgValue>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceRecord {
    pub trace_id: String,
    pub root_trace_ids: Vec<String>,
    pub create_time: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub trace_id: String,
    pub query: String,
    pub answer: String,
    /// Free-form per-kind metadata surviving past the turn, e.g. a ReAct or
    /// reflexion run's memory transcript so a future turn can resume it.
    #[serde(default)]
    pub extra: BTreeMap<String, ArgValue>,
    pub create_time: DateTime<Utc>,
}
