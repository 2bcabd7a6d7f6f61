//! Per-trace message bus: a bounded queue of `BusEvent`s one caller can drain
//! while an agent runs, so a long-running trace can stream `think`/`tool_call`
//! progress before the final answer lands.
//!
//! Grounded on `loom`'s `tokio_stream`/`tokio::sync::broadcast` use for
//! streaming node output to a CLI/websocket consumer; generalised here into a
//! registry of per-trace bounded channels (one producer side held by the
//! pipeline, one consumer side handed to whoever is watching the trace) since
//! multiple independent traces run concurrently and must not share backpressure.
//! Backed by a `VecDeque` rather than `tokio::sync::mpsc` because a lagging
//! watcher must see the most recent progress, not be stuck on whatever arrived
//! first — `mpsc::try_send` can only drop the event that didn't fit.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use mas_stream::{to_json, BusEvent, EnvelopeState};
use tokio::sync::Notify;

use crate::error::BusError;

const DEFAULT_CAPACITY: usize = 10;

struct TraceChannel {
    capacity: usize,
    queue: Mutex<VecDeque<serde_json::Value>>,
    notify: Notify,
    closed: AtomicBool,
    state: Mutex<EnvelopeState>,
}

impl TraceChannel {
    fn push(&self, payload: serde_json::Value) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= self.capacity {
            // Full: evict the oldest buffered event so the newest arrival,
            // the one a lagging watcher most needs, is never the one lost.
            queue.pop_front();
        }
        queue.push_back(payload);
        drop(queue);
        self.notify.notify_one();
    }
}

/// Consumer handle for one trace's events, returned by [`Bus::subscribe`].
pub struct BusReceiver {
    channel: Arc<TraceChannel>,
}

impl BusReceiver {
    /// Waits for the next event, or returns `None` once the trace has closed
    /// and the backlog has been fully drained.
    pub async fn recv(&mut self) -> Option<serde_json::Value> {
        loop {
            {
                let mut queue = self.channel.queue.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(event) = queue.pop_front() {
                    return Some(event);
                }
                if self.channel.closed.load(Ordering::Acquire) {
                    return None;
                }
            }
            self.channel.notify.notified().await;
        }
    }
}

/// Registry of open per-trace channels. A trace's channel is opened on first
/// subscribe and torn down when the trace completes (`close`d).
pub struct Bus {
    capacity: usize,
    channels: DashMap<String, Arc<TraceChannel>>,
}

impl Bus {
    pub fn new(capacity: usize) -> Self {
        Bus {
            capacity: capacity.max(1),
            channels: DashMap::new(),
        }
    }

    /// Opens (or returns a fresh handle onto) the channel for `trace_id`.
    pub fn subscribe(&self, trace_id: &str) -> BusReceiver {
        let channel = self
            .channels
            .entry(trace_id.to_string())
            .or_insert_with(|| {
                Arc::new(TraceChannel {
                    capacity: self.capacity,
                    queue: Mutex::new(VecDeque::new()),
                    notify: Notify::new(),
                    closed: AtomicBool::new(false),
                    state: Mutex::new(EnvelopeState::new(trace_id.to_string())),
                })
            })
            .clone();
        BusReceiver { channel }
    }

    /// Publishes `event` for `node_id` on `trace_id`'s channel, if anyone is
    /// subscribed. Publishing to a trace with no subscriber is a no-op, not
    /// an error — most dispatches run with nobody watching.
    pub fn publish(&self, trace_id: &str, node_id: &str, event: BusEvent) -> Result<(), BusError> {
        let Some(channel) = self.channels.get(trace_id) else {
            return Ok(());
        };
        let mut state = channel
            .state
            .lock()
            .map_err(|_| BusError::Closed)?;
        let payload = to_json(&event, node_id, &mut state)
            .map_err(|_| BusError::UnknownTrace(trace_id.to_string()))?;
        drop(state);

        channel.push(payload);
        Ok(())
    }

    /// Publishes the terminal `close` event and drops the channel entry.
    /// The receiver still drains whatever was already buffered before it
    /// observes the close.
    pub fn close(&self, trace_id: &str) {
        if let Some((_, channel)) = self.channels.remove(trace_id) {
            channel.push(serde_json::json!({
                "type": "close",
                "trace_id": trace_id,
            }));
            channel.closed.store(true, Ordering::Release);
            channel.notify.notify_one();
        }
    }

    pub fn is_open(&self, trace_id: &str) -> bool {
        self.channels.contains_key(trace_id)
    }
}

impl Default for Bus {
    fn default() -> Self {
        Bus::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_without_subscriber_is_a_no_op() {
        let bus = Bus::default();
        let result = bus.publish(
            "t1",
            "n1",
            BusEvent::Think {
                node_id: "n1".to_string(),
                text: "thinking".to_string(),
            },
        );
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn subscriber_receives_published_events_in_order() {
        let bus = Bus::default();
        let mut rx = bus.subscribe("t1");
        bus.publish(
            "t1",
            "n1",
            BusEvent::Think {
                node_id: "n1".to_string(),
                text: "first".to_string(),
            },
        )
        .unwrap();
        bus.publish(
            "t1",
            "n1",
            BusEvent::Answer {
                node_id: "n1".to_string(),
                output: mas_stream::BusValue::String("done".to_string()),
            },
        )
        .unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first["type"], "think");
        let second = rx.recv().await.unwrap();
        assert_eq!(second["type"], "answer");
    }

    #[tokio::test]
    async fn close_removes_the_channel() {
        let bus = Bus::default();
        let _rx = bus.subscribe("t1");
        assert!(bus.is_open("t1"));
        bus.close("t1");
        assert!(!bus.is_open("t1"));
    }

    #[tokio::test]
    async fn full_queue_evicts_the_oldest_event_not_the_newest() {
        let bus = Bus::new(2);
        let mut rx = bus.subscribe("t1");
        for i in 0..4 {
            bus.publish(
                "t1",
                "n1",
                BusEvent::Think {
                    node_id: "n1".to_string(),
                    text: format!("event-{i}"),
                },
            )
            .unwrap();
        }

        // Capacity 2: events 0 and 1 were evicted, 2 and 3 survive.
        let first = rx.recv().await.unwrap();
        assert_eq!(first["text"], "event-2");
        let second = rx.recv().await.unwrap();
        assert_eq!(second["text"], "event-3");
    }

    #[tokio::test]
    async fn recv_returns_none_after_close_drains_the_backlog() {
        let bus = Bus::default();
        let mut rx = bus.subscribe("t1");
        bus.publish(
            "t1",
            "n1",
            BusEvent::Think {
                node_id: "n1".to_string(),
                text: "last".to_string(),
            },
        )
        .unwrap();
        bus.close("t1");

        let think = rx.recv().await.unwrap();
        assert_eq!(think["type"], "think");
        let close = rx.recv().await.unwrap();
        assert_eq!(close["type"], "close");
        assert!(rx.recv().await.is_none());
    }
}
