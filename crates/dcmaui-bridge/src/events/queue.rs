use super::BridgeEvent;

/// FIFO buffer for events raised by native views
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<BridgeEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to the back of the queue
    pub fn push(&mut self, event: BridgeEvent) {
        self.events.push(event);
    }

    /// Take every pending event in FIFO order, leaving the queue empty
    pub fn take_all(&mut self) -> Vec<BridgeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop pending events that belong to `view_id`
    pub fn discard_view(&mut self, view_id: &str) {
        self.events.retain(|event| event.view_id != view_id);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropertySet;

    fn press(id: &str) -> BridgeEvent {
        BridgeEvent::new(id, "press", PropertySet::new())
    }

    #[test]
    fn test_event_queue_fifo() {
        let mut queue = EventQueue::new();

        queue.push(press("a"));
        queue.push(press("b"));
        queue.push(press("c"));

        assert_eq!(queue.len(), 3);

        let events = queue.take_all();
        let ids: Vec<_> = events.iter().map(|e| e.view_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        assert!(queue.is_empty());
    }

    #[test]
    fn test_discard_view() {
        let mut queue = EventQueue::new();

        queue.push(press("a"));
        queue.push(press("b"));
        queue.push(press("a"));

        queue.discard_view("a");
        assert_eq!(queue.len(), 1);

        queue.clear();
        assert!(queue.is_empty());
    }
}
