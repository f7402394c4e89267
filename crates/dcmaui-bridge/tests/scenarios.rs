//! End-to-end scenarios driving the bridge the way a remote layout engine would.
use dcmaui_bridge::components::{ButtonView, ImageView, ScrollView, TextView};
use dcmaui_bridge::stub::{CollectingSink, StubContainer};
use dcmaui_bridge::{
    Bridge, BridgeConfig, BridgeError, ComponentHandler, DuplicatePolicy, EventEmitter,
    HandlerError, NativeView, PropValue, PropertySet,
};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ready_bridge() -> Bridge {
    init_tracing();
    let mut bridge = Bridge::new(BridgeConfig::default()).unwrap();
    bridge.initialize();
    bridge
}

fn types(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_root_attached_after_container_is_set() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bridge = ready_bridge();

    bridge.create_view("root", "View", "{}").unwrap();
    bridge.set_root_container(Box::new(StubContainer::with_buffer(log.clone())));

    assert_eq!(*log.lock(), vec!["mount root (View)".to_string()]);
}

#[test]
fn test_button_press_reaches_sink() {
    let sink = CollectingSink::new();
    let mut bridge = ready_bridge();
    bridge.set_event_sink(sink.as_sink());

    bridge
        .create_view("btn1", "Button", r#"{"title":"Go"}"#)
        .unwrap();
    bridge
        .add_event_listeners("btn1", &types(&["press"]))
        .unwrap();

    let pressed = bridge
        .view("btn1")
        .and_then(|e| e.downcast_ref::<ButtonView>())
        .map(|b| b.press());
    assert_eq!(pressed, Some(true));

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].view_id.as_str(), "btn1");
    assert_eq!(events[0].event_type.as_str(), "press");
    assert!(events[0].data.is_empty());
}

#[test]
fn test_partial_update_keeps_other_fields() {
    let mut bridge = ready_bridge();
    bridge
        .create_view("btn1", "Button", r##"{"title":"Go","color":"#336699"}"##)
        .unwrap();
    bridge.update_view("btn1", r#"{"title":"Stop"}"#).unwrap();

    let info = bridge.view_info("btn1").unwrap();
    assert_eq!(info.opt_str("title").unwrap(), Some("Stop"));
    assert_eq!(info.opt_str("color").unwrap(), Some("#336699"));
}

#[test]
fn test_update_on_absent_id_never_creates() {
    let mut bridge = ready_bridge();
    let err = bridge.update_view("ghost", "{}").unwrap_err();
    assert!(matches!(err, BridgeError::UnknownViewId(ref id) if id == "ghost"));
    assert!(bridge.view("ghost").is_none());
}

#[test]
fn test_null_props_leave_fields_unchanged() {
    let mut bridge = ready_bridge();
    bridge
        .create_view("t", "Text", r#"{"content":"Hello","fontSize":14}"#)
        .unwrap();
    bridge
        .update_view("t", r#"{"content":null,"fontSize":18}"#)
        .unwrap();

    let text = bridge
        .view("t")
        .and_then(|e| e.downcast_ref::<TextView>())
        .unwrap();
    assert_eq!(text.content, "Hello");
    assert_eq!(text.font_size, Some(18));
}

#[test]
fn test_duplicate_create_policies() {
    let mut strict = ready_bridge();
    strict.create_view("a", "View", "{}").unwrap();
    assert_eq!(
        strict.create_view("a", "Text", "{}").unwrap_err().code(),
        "DUPLICATE_ID"
    );
    assert_eq!(strict.view("a").unwrap().kind(), "View");

    let mut lenient = Bridge::new(
        BridgeConfig::default().with_duplicate_ids(DuplicatePolicy::Replace),
    )
    .unwrap();
    lenient.initialize();
    lenient.create_view("a", "View", "{}").unwrap();
    lenient.create_view("a", "Text", "{}").unwrap();
    assert_eq!(lenient.view("a").unwrap().kind(), "Text");
    assert_eq!(lenient.views().len(), 1);
}

#[test]
fn test_remove_listener_never_attached() {
    let mut bridge = ready_bridge();
    bridge.create_view("btn1", "Button", "{}").unwrap();
    bridge
        .remove_event_listeners("btn1", &types(&["press", "longPress"]))
        .unwrap();
}

#[test]
fn test_scroll_view_reports_offset() {
    let sink = CollectingSink::new();
    let mut bridge = ready_bridge();
    bridge.set_event_sink(sink.as_sink());

    bridge.create_view("list", "ScrollView", "{}").unwrap();
    bridge
        .add_event_listeners("list", &types(&["scroll", "scrollEnd"]))
        .unwrap();

    let scroll = bridge
        .view_mut("list")
        .and_then(|e| e.downcast_mut::<ScrollView>())
        .unwrap();
    scroll.scroll_to(0.0, 42.5);
    scroll.end_scroll();

    let events = sink.events();
    let kinds: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(kinds, vec!["scroll", "scrollEnd"]);
    let offset = events[1].data.opt_map("contentOffset").unwrap().unwrap();
    assert_eq!(offset.get("y"), Some(&PropValue::Float(42.5)));
}

#[test]
fn test_image_requires_source() {
    let mut bridge = ready_bridge();
    let err = bridge
        .create_view("img", "Image", r#"{"width":10,"height":10}"#)
        .unwrap_err();
    assert_eq!(err.code(), "VIEW_CREATION_FAILED");

    bridge
        .create_view("img", "Image", r#"{"source":"logo.png"}"#)
        .unwrap();
    let image = bridge
        .view("img")
        .and_then(|e| e.downcast_ref::<ImageView>())
        .unwrap();
    assert_eq!(image.source, "logo.png");
}

#[test]
fn test_destroy_takes_whole_subtree() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bridge = ready_bridge();
    bridge.set_root_container(Box::new(StubContainer::with_buffer(log.clone())));

    bridge.create_view("root", "View", "{}").unwrap();
    bridge.create_view("row", "View", "{}").unwrap();
    bridge.create_view("label", "Text", "{}").unwrap();
    bridge.set_children("root", r#"["row"]"#).unwrap();
    bridge.attach_view("label", "row", 0).unwrap();

    bridge.destroy_view("root").unwrap();
    assert!(bridge.views().is_empty());
    assert_eq!(
        *log.lock(),
        vec!["mount root (View)".to_string(), "unmount root".to_string()]
    );

    // second destroy is a no-op
    bridge.destroy_view("root").unwrap();
}

/// Toggle switch registered by the host after start-up.
#[derive(Debug, Default)]
struct SwitchView {
    on: bool,
}

impl NativeView for SwitchView {
    fn type_name(&self) -> &'static str {
        "Switch"
    }

    fn snapshot(&self) -> PropertySet {
        PropertySet::new().with("on", self.on)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct SwitchHandler;

impl ComponentHandler for SwitchHandler {
    fn create(&self, props: &PropertySet) -> Result<Box<dyn NativeView>, HandlerError> {
        Ok(Box::new(SwitchView {
            on: props.opt_bool("on")?.unwrap_or(false),
        }))
    }

    fn update(&self, view: &mut dyn NativeView, props: &PropertySet) -> Result<(), HandlerError> {
        let on = props.opt_bool("on")?;
        let switch = view
            .downcast_mut::<SwitchView>()
            .ok_or(HandlerError::WrongViewType {
                expected: "Switch",
                found: "other",
            })?;
        if let Some(on) = on {
            switch.on = on;
        }
        Ok(())
    }

    fn attach_listeners(
        &self,
        _view: &mut dyn NativeView,
        _view_id: &str,
        _event_types: &[String],
        _emitter: &EventEmitter,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn detach_listeners(
        &self,
        _view: &mut dyn NativeView,
        _view_id: &str,
        _event_types: &[String],
    ) -> Result<(), HandlerError> {
        Ok(())
    }
}

#[test]
fn test_late_registered_kind() {
    let mut bridge = ready_bridge();
    assert_eq!(
        bridge.create_view("s", "Switch", "{}").unwrap_err().code(),
        "UNKNOWN_COMPONENT_KIND"
    );

    bridge.register_component("Switch", Arc::new(SwitchHandler));
    bridge.create_view("s", "Switch", r#"{"on":true}"#).unwrap();
    bridge.update_view("s", r#"{"on":false}"#).unwrap();

    let info = bridge.view_info("s").unwrap();
    assert_eq!(info.opt_bool("on").unwrap(), Some(false));
    assert!(bridge.registered_kinds().contains(&"Switch"));
}

#[test]
fn test_shared_bridge_across_threads() {
    let shared = ready_bridge().into_shared();

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                let id = format!("v{n}");
                shared.lock().create_view(&id, "View", "{}").unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.lock().views().len(), 4);
}
