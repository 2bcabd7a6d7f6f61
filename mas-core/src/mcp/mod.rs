//! MCP client: connects to a tool server over stdio, discovers its tools via
//! `tools/list`, and synthesizes one `Tool`-kind component per discovered
//! tool so MCP tools sit in the same registry as locally implemented ones.
//!
//! Grounded on `loom::tool_source::mcp::McpToolSource` (session plus
//! `tools/list`/`tools/call` mapping) and `loom::tools::mcp_adapter` (one
//! adapter object per discovered tool registered into a shared tool
//! registry) — generalised here to synthesize `registry::Component`s instead
//! of a separate `Tool` trait, since this crate has one component model for
//! every kind.

mod session;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mcp_core::ResultMessage;
use serde_json::Value;

use crate::envelope::{OxyRequest, OxyResponse};
use crate::error::{McpError, OxyError};
use crate::mas::Mas;
use crate::registry::{Behaviour, Component, ComponentKind, ComponentSpec};
use crate::value::ArgValue;

pub use session::{McpSession, McpSessionError};

#[derive(Clone, Debug)]
pub struct McpToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

/// Stdio-backed MCP tool server connection. Held behind a `Mutex` because
/// the underlying session's request/response cycle is synchronous and
/// mutates receiver state; calls are dispatched through `spawn_blocking`
/// so they don't block the async runtime's worker thread.
pub struct McpToolSource {
    session: Arc<Mutex<McpSession>>,
}

impl McpToolSource {
    pub fn new(
        command: impl Into<String>,
        args: Vec<String>,
        stderr_verbose: bool,
    ) -> Result<Self, McpSessionError> {
        let session = McpSession::new(command, args, None::<Vec<(String, String)>>, stderr_verbose)?;
        Ok(McpToolSource {
            session: Arc::new(Mutex::new(session)),
        })
    }

    pub async fn list_tools(&self) -> Result<Vec<McpToolSpec>, McpError> {
        let session = self.session.clone();
        tokio::task::spawn_blocking(move || list_tools_sync(&session))
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, McpError> {
        let session = self.session.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || call_tool_sync(&session, &name, arguments))
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?
    }
}

fn request(
    session: &Mutex<McpSession>,
    id: &str,
    method: &str,
    params: Value,
) -> Result<ResultMessage, McpError> {
    let mut session = session
        .lock()
        .map_err(|e| McpError::Transport(e.to_string()))?;
    session
        .send_request(id, method, params)
        .map_err(|e| McpError::Transport(e.to_string()))?;
    session
        .wait_for_result(id, std::time::Duration::from_secs(30))
        .map_err(|e| McpError::Transport(e.to_string()))?
        .ok_or_else(|| McpError::Transport(format!("timeout waiting for {method}")))
}

fn list_tools_sync(session: &Mutex<McpSession>) -> Result<Vec<McpToolSpec>, McpError> {
    let result = request(
        session,
        "mas-tools-list",
        "tools/list",
        Value::Object(serde_json::Map::new()),
    )?;
    if let Some(err) = result.error {
        return Err(McpError::Protocol(err.message));
    }
    let tools_value = result
        .result
        .and_then(|r| r.get("tools").cloned())
        .ok_or_else(|| McpError::Protocol("no tools in response".into()))?;
    let tools_array = tools_value
        .as_array()
        .ok_or_else(|| McpError::Protocol("tools not an array".into()))?;
    let mut specs = Vec::with_capacity(tools_array.len());
    for t in tools_array {
        let obj = t
            .as_object()
            .ok_or_else(|| McpError::Protocol("tool item not an object".into()))?;
        let name = obj
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        let description = obj
            .get("description")
            .and_then(|v| v.as_str())
            .map(String::from);
        let input_schema = obj
            .get("inputSchema")
            .cloned()
            .unwrap_or(Value::Object(serde_json::Map::new()));
        specs.push(McpToolSpec {
            name,
            description,
            input_schema,
        });
    }
    Ok(specs)
}

fn call_tool_sync(
    session: &Mutex<McpSession>,
    name: &str,
    arguments: Value,
) -> Result<String, McpError> {
    let id = format!("mas-call-{name}");
    let params = serde_json::json!({ "name": name, "arguments": arguments });
    let result = request(session, &id, "tools/call", params)?;
    if let Some(err) = result.error {
        return Err(McpError::Protocol(err.message));
    }
    let result_value = result
        .result
        .ok_or_else(|| McpError::Protocol("no result in tools/call response".into()))?;
    if result_value
        .get("isError")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
    {
        let msg = result_value
            .get("content")
            .and_then(|c| c.as_array())
            .and_then(|a| a.first())
            .and_then(|b| b.get("text").and_then(|t| t.as_str()))
            .unwrap_or("tool returned error")
            .to_string();
        return Err(McpError::Protocol(msg));
    }
    let mut text_parts = Vec::new();
    if let Some(content_array) = result_value.get("content").and_then(|c| c.as_array()) {
        for block in content_array {
            if block.get("type").and_then(|t| t.as_str()) == Some("text") {
                if let Some(t) = block.get("text").and_then(|v| v.as_str()) {
                    text_parts.push(t);
                }
            }
        }
    }
    let text = text_parts.join("\n").trim().to_string();
    if text.is_empty() {
        return Err(McpError::Protocol(
            "no text content in tools/call response".into(),
        ));
    }
    Ok(text)
}

/// A synthesized `Tool`-kind component forwarding `execute_inner` to one
/// MCP tool over a shared session.
struct McpGatewayTool {
    tool_name: String,
    source: Arc<McpToolSource>,
}

#[async_trait]
impl Behaviour for McpGatewayTool {
    async fn execute_inner(&self, _mas: &Mas, request: &OxyRequest) -> Result<OxyResponse, OxyError> {
        let arguments = request.arguments_as_json();
        let text = self
            .source
            .call_tool(&self.tool_name, arguments)
            .await
            .map_err(OxyError::from)?;
        Ok(OxyResponse::completed(ArgValue::string(text), request.clone()))
    }

    async fn cleanup(&self) {}
}

/// Discovers every tool the MCP server exposes and registers one component
/// per tool into `mas`'s registry, named `"{prefix}_{tool_name}"` to avoid
/// clashing with locally implemented tools of the same name.
pub async fn discover_and_register(
    mas: &Mas,
    prefix: &str,
    source: Arc<McpToolSource>,
) -> Result<Vec<String>, OxyError> {
    let specs = source.list_tools().await.map_err(OxyError::from)?;
    let mut registered = Vec::with_capacity(specs.len());
    for spec in specs {
        let component_name = format!("{prefix}_{}", spec.name);
        let mut component_spec = ComponentSpec::new(component_name.clone(), ComponentKind::Tool);
        component_spec.desc = spec.description.clone().unwrap_or_default();
        component_spec.desc_for_llm = component_spec.desc.clone();
        component_spec.input_schema = spec.input_schema.clone();
        mas.register(Component::new(
            component_spec,
            Arc::new(McpGatewayTool {
                tool_name: spec.name.clone(),
                source: source.clone(),
            }),
        ))
        .await?;
        registered.push(component_name);
    }
    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_a_session_against_a_nonexistent_command_fails() {
        let result = McpToolSource::new(
            "_mas_nonexistent_mcp_server_binary_",
            vec![],
            false,
        );
        assert!(result.is_err());
    }
}
