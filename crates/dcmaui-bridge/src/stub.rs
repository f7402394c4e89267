use crate::events::{BridgeEvent, EventSink};
use crate::native::{NativeView, RootContainer};
use crate::props::PropertySet;
use crate::ViewId;
use parking_lot::Mutex;
use std::sync::Arc;

/// Root container that records mount operations instead of touching a
/// real window.
///
/// Useful for tests and for the replay tool, where there is no platform
/// view hierarchy to attach to.
pub struct StubContainer {
    mounted: Option<ViewId>,
    /// Optional log buffer shared with the caller
    log_buffer: Option<Arc<Mutex<Vec<String>>>>,
}

impl StubContainer {
    pub fn new() -> Self {
        Self {
            mounted: None,
            log_buffer: None,
        }
    }

    /// Create a StubContainer that appends every operation to `buffer`
    pub fn with_buffer(buffer: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            mounted: None,
            log_buffer: Some(buffer),
        }
    }

    pub fn mounted(&self) -> Option<&str> {
        self.mounted.as_deref()
    }

    fn log(&self, msg: String) {
        tracing::debug!("{msg}");
        if let Some(buffer) = &self.log_buffer {
            buffer.lock().push(msg);
        }
    }
}

impl Default for StubContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl RootContainer for StubContainer {
    fn mount(&mut self, view_id: &str, view: &dyn NativeView) {
        self.mounted = Some(view_id.into());
        self.log(format!("mount {view_id} ({})", view.type_name()));
    }

    fn unmount(&mut self, view_id: &str) {
        if self.mounted.as_deref() == Some(view_id) {
            self.mounted = None;
        }
        self.log(format!("unmount {view_id}"));
    }
}

/// Event sink that keeps every event it receives.
#[derive(Clone, Default)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<BridgeEvent>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_sink(&self) -> Arc<dyn EventSink> {
        Arc::new(self.clone())
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<BridgeEvent> {
        self.events.lock().clone()
    }

    pub fn take_events(&self) -> Vec<BridgeEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for CollectingSink {
    fn on_event(&self, view_id: &str, event_type: &str, data: &PropertySet) {
        self.events
            .lock()
            .push(BridgeEvent::new(view_id, event_type, data.clone()));
    }
}
