//! Execution kernel for typed components (LLM clients, tools, composite
//! agents) connected by a call envelope threaded through a fixed pipeline.
//!
//! Grounded on `loom`'s crate-root re-export style (`pub use` of the
//! handful of types a caller constructs directly, modules kept private
//! otherwise), adapted to this crate's module set.

pub mod agents;
pub mod bus;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod llm;
pub mod mas;
pub mod mcp;
pub mod memory;
pub mod org;
pub mod pipeline;
pub mod registry;
pub mod remote_agent;
pub mod restart;
pub mod stores;
pub mod value;

pub use envelope::{OxyRequest, OxyResponse, OxyState};
pub use error::OxyError;
pub use mas::Mas;
pub use registry::{Behaviour, Component, ComponentKind, ComponentSpec, Registry};
pub use value::{ArgValue, Arguments};
