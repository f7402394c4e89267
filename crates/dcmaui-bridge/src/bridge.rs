use crate::component::{ComponentHandler, ComponentRegistry, HandlerError};
use crate::config::{BridgeConfig, DuplicatePolicy};
use crate::error::{BridgeError, Result};
use crate::events::{EventEmitter, EventSink};
use crate::native::{NativeView, RootContainer};
use crate::props::{decode_id_list, decode_props, PropValue, PropertySet};
use crate::view::{ViewEntry, ViewRegistry};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Bridge handle shared between host threads. Each command holds the lock
/// for its whole resolve-then-mutate sequence.
pub type SharedBridge = Arc<Mutex<Bridge>>;

/// The command surface a remote layout engine drives.
///
/// Owns the component registry, the view registry, the root container and
/// the event emitter. Hosts create one per UI session and pass it (or a
/// [`SharedBridge`]) to every entry point.
pub struct Bridge {
    config: BridgeConfig,
    initialized: bool,
    components: ComponentRegistry,
    views: ViewRegistry,
    root_container: Option<Box<dyn RootContainer>>,
    emitter: EventEmitter,
}

impl Bridge {
    /// Bridge with the built-in component kinds.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        Self::with_components(config, ComponentRegistry::new())
    }

    pub fn with_components(config: BridgeConfig, components: ComponentRegistry) -> Result<Self> {
        config.validate()?;
        let emitter = EventEmitter::new(config.event_delivery);
        Ok(Self {
            config,
            initialized: false,
            components,
            views: ViewRegistry::new(),
            root_container: None,
            emitter,
        })
    }

    pub fn into_shared(self) -> SharedBridge {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Move to the operational state. Calling it again is harmless.
    pub fn initialize(&mut self) {
        if self.initialized {
            tracing::debug!("bridge already initialized");
            return;
        }
        self.initialized = true;
        tracing::info!(
            root_view_id = %self.config.root_view_id,
            delivery = self.config.event_delivery.as_str(),
            kinds = self.components.len(),
            "bridge initialized"
        );
    }

    /// Late-bound extension point. Views created earlier keep their handler.
    pub fn register_component(
        &mut self,
        kind: &str,
        handler: Arc<dyn ComponentHandler>,
    ) -> Option<Arc<dyn ComponentHandler>> {
        self.components.register(kind, handler)
    }

    pub fn registered_kinds(&self) -> Vec<&str> {
        self.components.kinds()
    }

    pub fn create_view(&mut self, id: &str, kind: &str, props_payload: &str) -> Result<()> {
        self.ensure_initialized()?;
        let props = decode_props(props_payload)?;
        self.create_view_with_props(id, kind, &props)
    }

    /// Create a view from an already decoded property set.
    pub fn create_view_with_props(
        &mut self,
        id: &str,
        kind: &str,
        props: &PropertySet,
    ) -> Result<()> {
        self.ensure_initialized()?;

        let handler = self
            .components
            .resolve(kind)
            .ok_or_else(|| BridgeError::UnknownComponentKind(kind.to_string()))?;

        let replacing = self.views.contains(id);
        if replacing && self.config.duplicate_ids == DuplicatePolicy::Reject {
            tracing::warn!(id, kind, "rejected create for an id that is already registered");
            return Err(BridgeError::DuplicateId(id.to_string()));
        }

        let view = guard(|| handler.create(props)).map_err(|source| {
            tracing::warn!(id, kind, error = %source, "view creation failed");
            BridgeError::ViewCreation {
                id: id.to_string(),
                kind: kind.to_string(),
                source,
            }
        })?;

        let entry = ViewEntry::new(kind, handler, view);
        if replacing {
            if self.is_root(id) {
                if let Some(container) = self.root_container.as_mut() {
                    container.unmount(id);
                }
            }
            self.views.replace(id, entry);
            tracing::info!(id, kind, "replaced existing view");
        } else {
            self.views.insert(id, entry)?;
            tracing::debug!(id, kind, "view created");
        }

        self.mount_if_root(id);
        Ok(())
    }

    pub fn update_view(&mut self, id: &str, props_payload: &str) -> Result<()> {
        self.ensure_view(id)?;
        let props = decode_props(props_payload)?;
        self.update_view_with_props(id, &props)
    }

    /// Apply a partial update. Only the keys present in `props` change.
    pub fn update_view_with_props(&mut self, id: &str, props: &PropertySet) -> Result<()> {
        self.ensure_initialized()?;

        let entry = self
            .views
            .get_mut(id)
            .ok_or_else(|| BridgeError::UnknownViewId(id.to_string()))?;
        let handler = entry.handler();

        guard(|| handler.update(entry.view_mut(), props)).map_err(|source| {
            tracing::warn!(id, error = %source, "view update failed");
            BridgeError::ViewUpdate {
                id: id.to_string(),
                source,
            }
        })?;

        tracing::trace!(id, keys = props.len(), "view updated");
        Ok(())
    }

    /// Remove a view and its subtree. Destroying an unknown id succeeds.
    pub fn destroy_view(&mut self, id: &str) -> Result<()> {
        self.ensure_initialized()?;

        let removed = self.views.remove(id);
        if removed.is_empty() {
            tracing::debug!(id, "destroy for unknown view ignored");
            return Ok(());
        }

        for (view_id, _) in &removed {
            self.emitter.discard_view(view_id);
            if view_id.as_str() == self.config.root_view_id {
                if let Some(container) = self.root_container.as_mut() {
                    container.unmount(view_id);
                }
            }
        }
        tracing::debug!(id, count = removed.len(), "view destroyed");
        Ok(())
    }

    /// Drop every view, unmounting the root. Listeners go with their views.
    pub fn reset_views(&mut self) -> Result<()> {
        self.ensure_initialized()?;

        let root = self.config.root_view_id.as_str();
        if self.views.contains(root) {
            if let Some(container) = self.root_container.as_mut() {
                container.unmount(root);
            }
        }
        let count = self.views.len();
        self.views = ViewRegistry::new();
        self.emitter.clear_pending();
        tracing::info!(count, "view registry reset");
        Ok(())
    }

    pub fn add_event_listeners(&mut self, id: &str, event_types: &[String]) -> Result<()> {
        self.ensure_initialized()?;

        let entry = self
            .views
            .get_mut(id)
            .ok_or_else(|| BridgeError::UnknownViewId(id.to_string()))?;
        let handler = entry.handler();
        let emitter = &self.emitter;

        guard(|| handler.attach_listeners(entry.view_mut(), id, event_types, emitter))
            .map_err(|source| BridgeError::Listener {
                id: id.to_string(),
                source,
            })?;

        tracing::debug!(id, ?event_types, "listeners attached");
        Ok(())
    }

    pub fn remove_event_listeners(&mut self, id: &str, event_types: &[String]) -> Result<()> {
        self.ensure_initialized()?;

        let entry = self
            .views
            .get_mut(id)
            .ok_or_else(|| BridgeError::UnknownViewId(id.to_string()))?;
        let handler = entry.handler();

        guard(|| handler.detach_listeners(entry.view_mut(), id, event_types)).map_err(
            |source| BridgeError::Listener {
                id: id.to_string(),
                source,
            },
        )?;

        tracing::debug!(id, ?event_types, "listeners removed");
        Ok(())
    }

    pub fn attach_view(&mut self, child_id: &str, parent_id: &str, index: usize) -> Result<()> {
        self.ensure_initialized()?;
        self.views.attach_child(child_id, parent_id, index)?;
        tracing::debug!(child_id, parent_id, index, "view attached");
        Ok(())
    }

    /// Replace the children of `parent_id` with the ids in a JSON array payload.
    pub fn set_children(&mut self, parent_id: &str, child_ids_payload: &str) -> Result<()> {
        self.ensure_initialized()?;
        let child_ids = decode_id_list(child_ids_payload)?;
        self.set_children_ids(parent_id, &child_ids)
    }

    pub fn set_children_ids(&mut self, parent_id: &str, child_ids: &[String]) -> Result<()> {
        self.ensure_initialized()?;
        self.views.set_children(parent_id, child_ids)?;
        tracing::debug!(parent_id, count = child_ids.len(), "children replaced");
        Ok(())
    }

    /// Bind the platform attachment point; last call wins. An already created
    /// root view moves from the old container into the new one.
    pub fn set_root_container(&mut self, mut container: Box<dyn RootContainer>) {
        let root = self.config.root_view_id.as_str();

        if let Some(mut previous) = self.root_container.take() {
            if self.views.contains(root) {
                previous.unmount(root);
            }
        }

        match self.views.get(root) {
            Some(entry) => {
                container.mount(root, entry.view());
                tracing::info!(root, "root view mounted");
            }
            None => tracing::debug!(root, "root container bound, waiting for root view"),
        }
        self.root_container = Some(container);
    }

    /// Register the outward event callback, dropping the previous one.
    pub fn set_event_sink(&mut self, sink: Arc<dyn EventSink>) {
        if self.emitter.set_sink(Some(sink)).is_some() {
            tracing::debug!("replaced event sink");
        }
    }

    pub fn clear_event_sink(&mut self) {
        self.emitter.set_sink(None);
    }

    /// Clone of the emitter listeners report through.
    pub fn emitter(&self) -> EventEmitter {
        self.emitter.clone()
    }

    /// Hand queued events to the sink. Returns how many were delivered.
    ///
    /// Sinks run while `self` is borrowed. A host whose sink issues commands
    /// back into a [`SharedBridge`] should take [`Bridge::emitter`] under the
    /// lock and call [`EventEmitter::dispatch_pending`] after releasing it.
    pub fn dispatch_events(&mut self) -> usize {
        let count = self.emitter.dispatch_pending();
        if count > 0 {
            tracing::trace!(count, "dispatched queued events");
        }
        count
    }

    /// Push an event for `id` as if its native widget had raised it.
    /// `onPress`-style names are normalized to `press`.
    pub fn simulate_event(&mut self, id: &str, event_name: &str, data_payload: &str) -> Result<()> {
        self.ensure_initialized()?;
        let data = if data_payload.trim().is_empty() {
            PropertySet::new()
        } else {
            decode_props(data_payload)?
        };
        self.simulate_event_with_data(id, event_name, data)
    }

    pub fn simulate_event_with_data(
        &mut self,
        id: &str,
        event_name: &str,
        data: PropertySet,
    ) -> Result<()> {
        self.ensure_initialized()?;
        if !self.views.contains(id) {
            return Err(BridgeError::UnknownViewId(id.to_string()));
        }

        let event_type = normalize_event_name(event_name);
        tracing::debug!(id, event_type = %event_type, "simulating event");
        self.emitter.emit(id, &event_type, data);
        Ok(())
    }

    pub fn view(&self, id: &str) -> Option<&ViewEntry> {
        self.views.get(id)
    }

    pub fn view_mut(&mut self, id: &str) -> Option<&mut ViewEntry> {
        self.views.get_mut(id)
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    /// `{id, type, ...snapshot, children}` for one view.
    pub fn view_info(&self, id: &str) -> Result<PropertySet> {
        let entry = self
            .views
            .get(id)
            .ok_or_else(|| BridgeError::UnknownViewId(id.to_string()))?;

        let mut info = PropertySet::new().with("id", id).with("type", entry.kind());
        info.extend(entry.view().snapshot());
        let children: Vec<PropValue> = self
            .views
            .children(id)
            .iter()
            .map(|c| PropValue::from(c.as_str()))
            .collect();
        info.insert("children", PropValue::List(children));
        if let Some(parent) = self.views.parent(id) {
            info.insert("parent", parent);
        }
        Ok(info)
    }

    /// Human-readable dump of the view hierarchy.
    pub fn describe_tree(&self) -> String {
        let mut out = String::from("View Tree:\n");
        if self.views.is_empty() {
            out.push_str("(no views)\n");
        } else {
            out.push_str(&self.views.describe_hierarchy());
        }
        out
    }

    /// Fails unless the bridge is initialized and `id` is registered.
    pub fn ensure_view(&self, id: &str) -> Result<()> {
        self.ensure_initialized()?;
        if self.views.contains(id) {
            Ok(())
        } else {
            Err(BridgeError::UnknownViewId(id.to_string()))
        }
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(BridgeError::NotInitialized)
        }
    }

    fn is_root(&self, id: &str) -> bool {
        id == self.config.root_view_id
    }

    fn mount_if_root(&mut self, id: &str) {
        if !self.is_root(id) {
            return;
        }
        match (self.root_container.as_mut(), self.views.get(id)) {
            (Some(container), Some(entry)) => {
                container.mount(id, entry.view());
                tracing::info!(id, "root view mounted");
            }
            (None, _) => tracing::debug!(id, "root view created before a container was bound"),
            _ => {}
        }
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &self.config)
            .field("initialized", &self.initialized)
            .field("views", &self.views)
            .field("has_root_container", &self.root_container.is_some())
            .field("emitter", &self.emitter)
            .finish()
    }
}

/// Run handler code, turning a panic into `HandlerError::Panicked`.
fn guard<T>(
    f: impl FnOnce() -> std::result::Result<T, HandlerError>,
) -> std::result::Result<T, HandlerError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(HandlerError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// `onPress` -> `press`, `onScrollEnd` -> `scrollEnd`; other names pass through.
fn normalize_event_name(name: &str) -> String {
    match name.strip_prefix("on") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => {
            let mut chars = rest.chars();
            match chars.next() {
                Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                None => name.to_string(),
            }
        }
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ButtonView, TextView};
    use crate::config::EventDelivery;
    use crate::stub::{CollectingSink, StubContainer};

    fn bridge() -> Bridge {
        let mut bridge = Bridge::new(BridgeConfig::default()).unwrap();
        bridge.initialize();
        bridge
    }

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    struct PanickingHandler;

    impl ComponentHandler for PanickingHandler {
        fn create(&self, _props: &PropertySet) -> std::result::Result<Box<dyn NativeView>, HandlerError> {
            panic!("widget toolkit exploded");
        }

        fn update(
            &self,
            _view: &mut dyn NativeView,
            _props: &PropertySet,
        ) -> std::result::Result<(), HandlerError> {
            Ok(())
        }

        fn attach_listeners(
            &self,
            _view: &mut dyn NativeView,
            _view_id: &str,
            _event_types: &[String],
            _emitter: &EventEmitter,
        ) -> std::result::Result<(), HandlerError> {
            Ok(())
        }

        fn detach_listeners(
            &self,
            _view: &mut dyn NativeView,
            _view_id: &str,
            _event_types: &[String],
        ) -> std::result::Result<(), HandlerError> {
            Ok(())
        }
    }

    #[test]
    fn test_commands_fail_before_initialize() {
        let mut bridge = Bridge::new(BridgeConfig::default()).unwrap();
        let err = bridge.create_view("a", "View", "{}").unwrap_err();
        assert_eq!(err.code(), "NOT_INITIALIZED");
        assert!(bridge.destroy_view("a").is_err());
        assert!(bridge.views().is_empty());
    }

    #[test]
    fn test_create_then_get() {
        let mut bridge = bridge();
        bridge
            .create_view("t1", "Text", r#"{"content":"Hello"}"#)
            .unwrap();

        let entry = bridge.view("t1").unwrap();
        assert_eq!(entry.kind(), "Text");
        assert_eq!(entry.downcast_ref::<TextView>().unwrap().content, "Hello");
    }

    #[test]
    fn test_create_failures_leave_no_entry() {
        let mut bridge = bridge();

        let err = bridge.create_view("x", "Slider", "{}").unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_COMPONENT_KIND");

        let err = bridge.create_view("x", "View", "{not json").unwrap_err();
        assert_eq!(err.code(), "PAYLOAD_DECODE_ERROR");

        let err = bridge.create_view("x", "Image", "{}").unwrap_err();
        assert_eq!(err.code(), "VIEW_CREATION_FAILED");

        assert!(bridge.views().is_empty());
    }

    #[test]
    fn test_handler_panic_is_contained() {
        let mut bridge = bridge();
        bridge.register_component("Boom", Arc::new(PanickingHandler));

        let err = bridge.create_view("b", "Boom", "{}").unwrap_err();
        match err {
            BridgeError::ViewCreation { source, .. } => {
                assert_eq!(
                    source,
                    HandlerError::Panicked("widget toolkit exploded".into())
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!bridge.views().contains("b"));

        // still usable afterwards
        bridge.create_view("v", "View", "{}").unwrap();
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let mut bridge = bridge();
        bridge.create_view("t", "Text", r#"{"content":"first"}"#).unwrap();

        let err = bridge
            .create_view("t", "Text", r#"{"content":"second"}"#)
            .unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_ID");
        let text = bridge.view("t").unwrap().downcast_ref::<TextView>().unwrap();
        assert_eq!(text.content, "first");
    }

    #[test]
    fn test_duplicate_replace_policy() {
        let config = BridgeConfig::default().with_duplicate_ids(DuplicatePolicy::Replace);
        let mut bridge = Bridge::new(config).unwrap();
        bridge.initialize();

        bridge.create_view("root", "View", "{}").unwrap();
        bridge.create_view("t", "Text", r#"{"content":"first"}"#).unwrap();
        bridge.attach_view("t", "root", 0).unwrap();

        bridge.create_view("t", "Button", r#"{"title":"Go"}"#).unwrap();
        assert_eq!(bridge.views().len(), 2);
        assert_eq!(bridge.view("t").unwrap().kind(), "Button");
        assert_eq!(bridge.views().parent("t"), Some("root"));
    }

    #[test]
    fn test_replacing_root_remounts_it() {
        let config = BridgeConfig::default().with_duplicate_ids(DuplicatePolicy::Replace);
        let mut bridge = Bridge::new(config).unwrap();
        bridge.initialize();
        let log = Arc::new(Mutex::new(Vec::new()));
        bridge.set_root_container(Box::new(StubContainer::with_buffer(log.clone())));

        bridge.create_view("root", "View", "{}").unwrap();
        bridge.create_view("root", "Button", r#"{"title":"Go"}"#).unwrap();

        assert_eq!(
            *log.lock(),
            vec![
                "mount root (View)".to_string(),
                "unmount root".to_string(),
                "mount root (Button)".to_string(),
            ]
        );
        assert_eq!(bridge.views().len(), 1);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut bridge = bridge();
        let err = bridge.update_view("ghost", r#"{"title":"x"}"#).unwrap_err();
        assert_eq!(err.code(), "VIEW_NOT_FOUND");
        assert!(!bridge.views().contains("ghost"));
    }

    #[test]
    fn test_update_uses_pinned_handler() {
        let mut bridge = bridge();
        bridge.create_view("b", "Button", r#"{"title":"Go"}"#).unwrap();

        // A new handler for the kind only affects views created afterwards.
        bridge.register_component("Button", Arc::new(PanickingHandler));
        bridge.update_view("b", r#"{"title":"Stop"}"#).unwrap();

        let button = bridge.view("b").unwrap().downcast_ref::<ButtonView>().unwrap();
        assert_eq!(button.title, "Stop");
    }

    #[test]
    fn test_root_mounted_when_container_arrives_later() {
        let mut bridge = bridge();
        let log = Arc::new(Mutex::new(Vec::new()));

        bridge.create_view("root", "View", "{}").unwrap();
        assert!(log.lock().is_empty());

        bridge.set_root_container(Box::new(StubContainer::with_buffer(log.clone())));
        assert_eq!(*log.lock(), vec!["mount root (View)".to_string()]);

        bridge.destroy_view("root").unwrap();
        assert_eq!(log.lock().last().map(String::as_str), Some("unmount root"));
    }

    #[test]
    fn test_root_mounted_on_create_when_container_bound() {
        let mut bridge = bridge();
        let log = Arc::new(Mutex::new(Vec::new()));
        bridge.set_root_container(Box::new(StubContainer::with_buffer(log.clone())));
        assert!(log.lock().is_empty());

        bridge.create_view("other", "View", "{}").unwrap();
        bridge.create_view("root", "View", "{}").unwrap();
        assert_eq!(*log.lock(), vec!["mount root (View)".to_string()]);
    }

    #[test]
    fn test_destroy_unknown_is_noop() {
        let mut bridge = bridge();
        bridge.destroy_view("nothing").unwrap();
    }

    #[test]
    fn test_listener_round_trip() {
        let mut bridge = bridge();
        let sink = CollectingSink::new();
        bridge.set_event_sink(sink.as_sink());

        bridge.create_view("btn1", "Button", r#"{"title":"Go"}"#).unwrap();
        bridge.remove_event_listeners("btn1", &types(&["press"])).unwrap();
        bridge.add_event_listeners("btn1", &types(&["press"])).unwrap();

        let button = bridge.view("btn1").unwrap().downcast_ref::<ButtonView>().unwrap();
        assert!(button.press());

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].view_id.as_str(), "btn1");
        assert_eq!(events[0].event_type.as_str(), "press");
    }

    #[test]
    fn test_queued_events_wait_for_dispatch() {
        let config = BridgeConfig::default().with_event_delivery(EventDelivery::Queued);
        let mut bridge = Bridge::new(config).unwrap();
        bridge.initialize();
        let sink = CollectingSink::new();
        bridge.set_event_sink(sink.as_sink());

        bridge.create_view("b", "View", "{}").unwrap();
        bridge.simulate_event("b", "onPress", "").unwrap();
        assert!(sink.events().is_empty());

        assert_eq!(bridge.dispatch_events(), 1);
        assert_eq!(sink.events()[0].event_type.as_str(), "press");
    }

    #[test]
    fn test_destroy_discards_queued_events() {
        let config = BridgeConfig::default().with_event_delivery(EventDelivery::Queued);
        let mut bridge = Bridge::new(config).unwrap();
        bridge.initialize();
        let sink = CollectingSink::new();
        bridge.set_event_sink(sink.as_sink());

        bridge.create_view("b", "View", "{}").unwrap();
        bridge.simulate_event("b", "press", "{}").unwrap();
        bridge.destroy_view("b").unwrap();

        assert_eq!(bridge.dispatch_events(), 0);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_view_info_and_tree() {
        let mut bridge = bridge();
        bridge.create_view("root", "View", "{}").unwrap();
        bridge.create_view("label", "Text", r#"{"content":"Hi"}"#).unwrap();
        bridge.set_children("root", r#"["label"]"#).unwrap();

        let info = bridge.view_info("label").unwrap();
        assert_eq!(info.opt_str("type").unwrap(), Some("Text"));
        assert_eq!(info.opt_str("content").unwrap(), Some("Hi"));
        assert_eq!(info.opt_str("parent").unwrap(), Some("root"));

        assert_eq!(
            bridge.describe_tree(),
            "View Tree:\nroot (View)\n  label (Text)\n"
        );
    }

    #[test]
    fn test_reset_views() {
        let mut bridge = bridge();
        let log = Arc::new(Mutex::new(Vec::new()));
        bridge.set_root_container(Box::new(StubContainer::with_buffer(log.clone())));
        bridge.create_view("root", "View", "{}").unwrap();
        bridge.create_view("a", "View", "{}").unwrap();

        bridge.reset_views().unwrap();
        assert!(bridge.views().is_empty());
        assert_eq!(log.lock().last().map(String::as_str), Some("unmount root"));
    }

    #[test]
    fn test_reset_discards_queued_events() {
        let config = BridgeConfig::default().with_event_delivery(EventDelivery::Queued);
        let mut bridge = Bridge::new(config).unwrap();
        bridge.initialize();
        let sink = CollectingSink::new();
        bridge.set_event_sink(sink.as_sink());

        bridge.create_view("b", "Button", "{}").unwrap();
        bridge.simulate_event("b", "press", "").unwrap();
        bridge.reset_views().unwrap();

        assert_eq!(bridge.dispatch_events(), 0);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_normalize_event_name() {
        assert_eq!(normalize_event_name("onPress"), "press");
        assert_eq!(normalize_event_name("onScrollEnd"), "scrollEnd");
        assert_eq!(normalize_event_name("press"), "press");
        assert_eq!(normalize_event_name("once"), "once");
        assert_eq!(normalize_event_name("on"), "on");
    }
}
