//! Example binary: wires an echo tool, an LLM component, and a ReAct agent
//! into a `Mas`, then dispatches one query and prints the answer.
//!
//! Not a product CLI — `mas-core`'s own integration tests and this binary's
//! own smoke test are the only expected callers. A real deployment registers
//! its own components programmatically against the library crate instead.

use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;

use mas_core::envelope::{OxyRequest, OxyResponse};
use mas_core::error::OxyError;
use mas_core::llm::mock::MockLlm;
use mas_core::llm::openai::OpenAiClient;
use mas_core::llm::{LlmBehaviour, LlmClient};
use mas_core::mas::Mas;
use mas_core::registry::{Behaviour, Component, ComponentKind, ComponentSpec};
use mas_core::value::ArgValue;

#[derive(Parser, Debug)]
#[command(name = "mas")]
#[command(about = "Dispatch one query against a minimal echo-tool + ReAct agent wiring")]
struct Args {
    /// User message to send to the agent.
    query: String,

    /// Use the scripted mock LLM instead of an OpenAI-compatible provider,
    /// even if MAS_LLM_API_KEY is set.
    #[arg(long)]
    mock: bool,

    /// Emit the response as JSON instead of the plain answer text.
    #[arg(long)]
    json: bool,
}

struct EchoTool;

#[async_trait]
impl Behaviour for EchoTool {
    async fn execute_inner(
        &self,
        _mas: &Mas,
        request: &OxyRequest,
    ) -> Result<OxyResponse, OxyError> {
        let text = request.get_arg_str("text").unwrap_or_default();
        Ok(OxyResponse::completed(
            ArgValue::string(format!("echo: {text}")),
            request.clone(),
        ))
    }
}

fn llm_client(env: &mas_config::Env, mock: bool) -> Arc<dyn LlmClient> {
    match (&env.llm_api_key, mock) {
        (Some(api_key), false) => Arc::new(
            OpenAiClient::new(
                env.llm_base_url.clone(),
                api_key.clone(),
                "gpt-4o-mini",
            )
            .with_system_prompt(
                "You are a helpful assistant. Reply with plain text, \
                 or a ```json {\"tool_name\":...,\"arguments\":{...}} ``` block to call a tool.",
            ),
        ),
        _ => Arc::new(MockLlm::new(vec![
            "I don't have a live provider configured, so here is a canned reply.".to_string(),
        ])),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = mas_config::Env::from_process("mas", None);
    mas_config::init_tracing(&env.log_filter);

    let args = Args::parse();
    let mas = Mas::with_bus_capacity(env.bus_capacity);

    mas.register(Component::new(
        ComponentSpec::new("echo", ComponentKind::Tool),
        Arc::new(EchoTool),
    ))
    .await?;
    mas.register(Component::new(
        ComponentSpec::new("llm", ComponentKind::Llm),
        Arc::new(LlmBehaviour::new(llm_client(&env, args.mock))),
    ))
    .await?;
    mas.register(Component::new(
        ComponentSpec::new("agent", ComponentKind::Agent)
            .with_permitted_callees(["echo".to_string()]),
        Arc::new(mas_core::agents::react::ReactBehaviour::new("llm")),
    ))
    .await?;

    let response = mas.chat_with_agent("agent", args.query).await?;

    if args.json {
        println!("{}", serde_json::to_string(&response.output.to_json())?);
    } else {
        println!("{}", response.output.as_str().unwrap_or_default());
    }
    Ok(())
}
