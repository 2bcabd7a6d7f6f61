//! Wire shape for one message-bus event: type + payload,
//! plus envelope injection (trace_id, node_id, seq). Does not depend on
//! `mas-core`; the bus bridges its internal event into [`BusEvent`] and
//! calls [`to_json`] before handing the value to a subscriber.

pub mod envelope;
pub mod event;

pub use envelope::{to_json, Envelope, EnvelopeState};
pub use event::{BusEvent, BusValue};
