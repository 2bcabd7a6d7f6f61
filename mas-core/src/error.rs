//! Error types for the execution kernel.
//!
//! Every fallible subsystem gets its own enum; [`OxyError`] is what stage 10
//! of the pipeline normalises subsystem errors into before producing a
//! `FAILED` response. No `unwrap`/`expect` outside tests.

use thiserror::Error;

/// Errors from the trace/history/message stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("serialization: {0}")]
    Serialization(String),
    #[error("storage: {0}")]
    Storage(String),
}

/// Errors from the message bus.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("unknown trace: {0}")]
    UnknownTrace(String),
    #[error("channel closed")]
    Closed,
}

/// Errors from an LLM client adapter.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("multimodal resource fetch failed: {0}")]
    ResourceFetch(String),
    #[error("request build failed: {0}")]
    InvalidRequest(String),
}

/// Errors from an MCP client/gateway.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("tool not found: {0}")]
    ToolNotFound(String),
}

/// Errors from the restart/replay engine.
#[derive(Debug, Error)]
pub enum RestartError {
    #[error("referenced trace not found: {0}")]
    TraceNotFound(String),
    #[error("referenced node not found: {0}")]
    NodeNotFound(String),
}

/// Top-level kernel error. Stage 10 of the pipeline catches
/// any of these, or a component's own `func_execute` error, and converts it
/// into an `OxyResponse(FAILED, message)` that then flows through stages
/// 11-13 identically to a success.
#[derive(Debug, Error)]
pub enum OxyError {
    #[error("Tool {0} not exists")]
    ComponentNotFound(String),
    #[error("component {0} already registered")]
    DuplicateRegistration(String),
    #[error("Executing tool {0} timed out")]
    Timeout(String),
    #[error("canceled")]
    Canceled,
    #[error("tool runtime failure: {0}")]
    RuntimeFailure(String),
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Bus(#[from] BusError),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Mcp(#[from] McpError),
    #[error(transparent)]
    Restart(#[from] RestartError),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: timeout message matches literal text.
    #[test]
    fn timeout_message_matches_spec() {
        let err = OxyError::Timeout("tool_x".to_string());
        assert_eq!(err.to_string(), "Executing tool tool_x timed out");
    }

    /// **Scenario**: missing-component message matches literal text.
    #[test]
    fn missing_component_message_matches_spec() {
        let err = OxyError::ComponentNotFound("tool_x".to_string());
        assert_eq!(err.to_string(), "Tool tool_x not exists");
    }
}
