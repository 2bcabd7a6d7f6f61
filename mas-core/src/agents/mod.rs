//! Composite agents and flows: behaviours that dispatch sub-calls to their
//! permitted callees through the shared pipeline rather than running a
//! single leaf action.
//!
//! Grounded on `loom::agent::{react, got, tot}`, which express each pattern
//! as a compiled graph of nodes threaded through a shared state struct. This
//! crate's components are `Behaviour` objects dispatching through one fixed
//! pipeline instead of a compiled graph, so each pattern here collapses that
//! node sequence into a single state-machine function that issues
//! `OxyRequest::call` sub-dispatches.

pub mod parallel;
pub mod plan_and_solve;
pub mod react;
pub mod reflexion;
pub mod workflow;
