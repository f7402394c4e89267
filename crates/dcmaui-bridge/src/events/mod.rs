mod listeners;
mod queue;

pub use listeners::{Listener, ListenerSet};
pub use queue::EventQueue;

use crate::config::EventDelivery;
use crate::props::PropertySet;
use crate::ViewId;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use smartstring::alias::String as SmartString;
use std::fmt;
use std::sync::Arc;

/// An interaction raised by a native view, addressed by view id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeEvent {
    pub view_id: ViewId,
    pub event_type: SmartString,
    pub data: PropertySet,
}

impl BridgeEvent {
    pub fn new(view_id: &str, event_type: &str, data: PropertySet) -> Self {
        Self {
            view_id: view_id.into(),
            event_type: event_type.into(),
            data,
        }
    }
}

/// The single outward event callback registered by the host.
pub trait EventSink: Send + Sync {
    fn on_event(&self, view_id: &str, event_type: &str, data: &PropertySet);
}

impl<F> EventSink for F
where
    F: Fn(&str, &str, &PropertySet) + Send + Sync,
{
    fn on_event(&self, view_id: &str, event_type: &str, data: &PropertySet) {
        self(view_id, event_type, data)
    }
}

struct EmitterState {
    delivery: EventDelivery,
    sink: RwLock<Option<Arc<dyn EventSink>>>,
    queue: Mutex<EventQueue>,
}

/// Shared handle through which native listeners hand events to the host.
///
/// Listeners keep a clone of the emitter rather than the sink itself, so
/// replacing the sink redirects every installed listener at once.
#[derive(Clone)]
pub struct EventEmitter {
    state: Arc<EmitterState>,
}

impl EventEmitter {
    pub fn new(delivery: EventDelivery) -> Self {
        Self {
            state: Arc::new(EmitterState {
                delivery,
                sink: RwLock::new(None),
                queue: Mutex::new(EventQueue::new()),
            }),
        }
    }

    pub fn delivery(&self) -> EventDelivery {
        self.state.delivery
    }

    /// Install a new sink, returning the one it replaces.
    pub fn set_sink(&self, sink: Option<Arc<dyn EventSink>>) -> Option<Arc<dyn EventSink>> {
        std::mem::replace(&mut *self.state.sink.write(), sink)
    }

    pub fn has_sink(&self) -> bool {
        self.state.sink.read().is_some()
    }

    pub fn emit(&self, view_id: &str, event_type: &str, data: PropertySet) {
        match self.state.delivery {
            EventDelivery::Immediate => self.deliver(view_id, event_type, &data),
            EventDelivery::Queued => {
                self.state
                    .queue
                    .lock()
                    .push(BridgeEvent::new(view_id, event_type, data));
            }
        }
    }

    /// Deliver every queued event to the current sink. Returns how many were drained.
    pub fn dispatch_pending(&self) -> usize {
        // Take the batch first so a sink that raises new events does not deadlock.
        let events = self.state.queue.lock().take_all();
        let count = events.len();
        for event in events {
            self.deliver(&event.view_id, &event.event_type, &event.data);
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.state.queue.lock().len()
    }

    pub fn discard_view(&self, view_id: &str) {
        self.state.queue.lock().discard_view(view_id);
    }

    /// Drop every queued event without delivering it.
    pub fn clear_pending(&self) {
        self.state.queue.lock().clear();
    }

    fn deliver(&self, view_id: &str, event_type: &str, data: &PropertySet) {
        let sink = self.state.sink.read().clone();
        match sink {
            Some(sink) => sink.on_event(view_id, event_type, data),
            None => tracing::debug!(view_id, event_type, "no event sink bound, dropping event"),
        }
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("delivery", &self.state.delivery)
            .field("has_sink", &self.has_sink())
            .field("pending", &self.pending())
            .finish()
    }
}
