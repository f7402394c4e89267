use super::base::{BasePatch, BaseStyle};
use super::{install_listeners, remove_listeners};
use crate::component::{expect_view, ComponentHandler, HandlerError};
use crate::events::{EventEmitter, ListenerSet};
use crate::native::{Color, NativeView};
use crate::props::{PropError, PropertySet};
use std::any::Any;

pub const KIND: &str = "Button";
pub const PRESS: &str = "press";

const EVENTS: &[&str] = &[PRESS];

/// Push button widget.
#[derive(Debug, Clone)]
pub struct ButtonView {
    pub style: BaseStyle,
    pub title: String,
    pub title_color: Option<Color>,
    pub enabled: bool,
    listeners: ListenerSet,
}

impl Default for ButtonView {
    fn default() -> Self {
        Self {
            style: BaseStyle::default(),
            title: String::new(),
            title_color: None,
            enabled: true,
            listeners: ListenerSet::new(),
        }
    }
}

impl ButtonView {
    /// Native touch-up-inside. Disabled buttons swallow the press.
    /// Returns true when a listener received the event.
    pub fn press(&self) -> bool {
        if !self.enabled {
            return false;
        }
        self.listeners.fire(PRESS, PropertySet::new())
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }
}

impl NativeView for ButtonView {
    fn type_name(&self) -> &'static str {
        KIND
    }

    fn snapshot(&self) -> PropertySet {
        let mut out = PropertySet::new();
        self.style.write_snapshot(&mut out);
        out.insert("title", self.title.as_str());
        if let Some(color) = self.title_color {
            out.insert("color", color.to_hex());
        }
        out.insert("disabled", !self.enabled);
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct ButtonPatch {
    base: BasePatch,
    title: Option<String>,
    color: Option<Color>,
    disabled: Option<bool>,
}

impl ButtonPatch {
    fn from_props(props: &PropertySet) -> Result<Self, PropError> {
        Ok(Self {
            base: BasePatch::from_props(props)?,
            title: props.opt_str("title")?.map(str::to_string),
            color: props.opt_str("color")?.map(Color::from_hex),
            disabled: props.opt_bool("disabled")?,
        })
    }

    fn apply(self, view: &mut ButtonView) {
        self.base.apply(&mut view.style);
        if let Some(title) = self.title {
            view.title = title;
        }
        if let Some(color) = self.color {
            view.title_color = Some(color);
        }
        if let Some(disabled) = self.disabled {
            view.enabled = !disabled;
        }
    }
}

pub struct ButtonHandler;

impl ComponentHandler for ButtonHandler {
    fn create(&self, props: &PropertySet) -> Result<Box<dyn NativeView>, HandlerError> {
        let patch = ButtonPatch::from_props(props)?;
        let mut view = ButtonView::default();
        patch.apply(&mut view);
        Ok(Box::new(view))
    }

    fn update(&self, view: &mut dyn NativeView, props: &PropertySet) -> Result<(), HandlerError> {
        let patch = ButtonPatch::from_props(props)?;
        patch.apply(expect_view::<ButtonView>(view, KIND)?);
        Ok(())
    }

    fn attach_listeners(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        event_types: &[String],
        emitter: &EventEmitter,
    ) -> Result<(), HandlerError> {
        let button = expect_view::<ButtonView>(view, KIND)?;
        install_listeners(
            &mut button.listeners,
            EVENTS,
            KIND,
            view_id,
            event_types,
            emitter,
        );
        Ok(())
    }

    fn detach_listeners(
        &self,
        view: &mut dyn NativeView,
        _view_id: &str,
        event_types: &[String],
    ) -> Result<(), HandlerError> {
        let button = expect_view::<ButtonView>(view, KIND)?;
        remove_listeners(&mut button.listeners, event_types);
        Ok(())
    }

    fn supported_events(&self) -> &'static [&'static str] {
        EVENTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EventDelivery;
    use crate::props::decode_props;
    use crate::stub::CollectingSink;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_update_keeps_color() {
        let handler = ButtonHandler;
        let mut view = handler
            .create(&decode_props(r##"{"title":"Go","color":"#FF0000"}"##).unwrap())
            .unwrap();

        handler
            .update(view.as_mut(), &decode_props(r#"{"title":"Stop"}"#).unwrap())
            .unwrap();

        let button = view.downcast_ref::<ButtonView>().unwrap();
        assert_eq!(button.title, "Stop");
        assert_eq!(button.title_color, Some(Color::from_hex("#FF0000")));
        assert!(button.enabled);
    }

    #[test]
    fn test_press_reaches_sink_once_attached() {
        let emitter = EventEmitter::new(EventDelivery::Immediate);
        let sink = CollectingSink::new();
        emitter.set_sink(Some(sink.as_sink()));

        let handler = ButtonHandler;
        let mut view = handler.create(&PropertySet::new()).unwrap();
        assert!(!view.downcast_ref::<ButtonView>().unwrap().press());

        handler
            .attach_listeners(view.as_mut(), "btn1", &types(&["press", "hover"]), &emitter)
            .unwrap();
        // attaching twice replaces, it does not double-fire
        handler
            .attach_listeners(view.as_mut(), "btn1", &types(&["press"]), &emitter)
            .unwrap();

        let button = view.downcast_ref::<ButtonView>().unwrap();
        assert_eq!(button.listeners().len(), 1);
        assert!(button.press());
        assert_eq!(sink.events().len(), 1);

        handler
            .detach_listeners(view.as_mut(), "btn1", &types(&["press", "press"]))
            .unwrap();
        assert!(!view.downcast_ref::<ButtonView>().unwrap().press());
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn test_disabled_button_swallows_press() {
        let emitter = EventEmitter::new(EventDelivery::Immediate);
        let sink = CollectingSink::new();
        emitter.set_sink(Some(sink.as_sink()));

        let handler = ButtonHandler;
        let mut view = handler
            .create(&decode_props(r#"{"disabled":true}"#).unwrap())
            .unwrap();
        handler
            .attach_listeners(view.as_mut(), "btn1", &types(&["press"]), &emitter)
            .unwrap();

        assert!(!view.downcast_ref::<ButtonView>().unwrap().press());
        assert!(sink.events().is_empty());
    }
}
