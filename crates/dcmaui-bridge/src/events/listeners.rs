use super::EventEmitter;
use crate::props::PropertySet;
use crate::ViewId;
use smallvec::SmallVec;
use smartstring::alias::String as SmartString;

/// A native callback bound to one (view id, event type) pair.
#[derive(Debug, Clone)]
pub struct Listener {
    view_id: ViewId,
    event_type: SmartString,
    emitter: EventEmitter,
}

impl Listener {
    pub fn new(view_id: &str, event_type: &str, emitter: &EventEmitter) -> Self {
        Self {
            view_id: view_id.into(),
            event_type: event_type.into(),
            emitter: emitter.clone(),
        }
    }

    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn fire(&self, data: PropertySet) {
        self.emitter.emit(&self.view_id, &self.event_type, data);
    }
}

/// Active listeners of a single native view, at most one per event type.
#[derive(Debug, Clone, Default)]
pub struct ListenerSet {
    listeners: SmallVec<[Listener; 2]>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self {
            listeners: SmallVec::new(),
        }
    }

    /// Install a listener, replacing any prior listener for the same type.
    pub fn install(&mut self, listener: Listener) {
        match self
            .listeners
            .iter_mut()
            .find(|l| l.event_type == listener.event_type)
        {
            Some(slot) => *slot = listener,
            None => self.listeners.push(listener),
        }
    }

    /// Remove the listener for `event_type`. Returns false when none was active.
    pub fn remove(&mut self, event_type: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.event_type.as_str() != event_type);
        self.listeners.len() != before
    }

    pub fn is_attached(&self, event_type: &str) -> bool {
        self.get(event_type).is_some()
    }

    pub fn get(&self, event_type: &str) -> Option<&Listener> {
        self.listeners
            .iter()
            .find(|l| l.event_type.as_str() == event_type)
    }

    /// Fire the listener for `event_type`. Returns false when nothing is attached.
    pub fn fire(&self, event_type: &str, data: PropertySet) -> bool {
        match self.get(event_type) {
            Some(listener) => {
                listener.fire(data);
                true
            }
            None => false,
        }
    }

    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.listeners.iter().map(|l| l.event_type())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
