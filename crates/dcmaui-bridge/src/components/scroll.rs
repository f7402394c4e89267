use super::base::{BasePatch, BaseStyle};
use super::{install_listeners, remove_listeners};
use crate::component::{expect_view, ComponentHandler, HandlerError};
use crate::events::{EventEmitter, ListenerSet};
use crate::native::NativeView;
use crate::props::{PropError, PropertySet};
use std::any::Any;

pub const KIND: &str = "ScrollView";
pub const SCROLL: &str = "scroll";
pub const SCROLL_END: &str = "scrollEnd";

const EVENTS: &[&str] = &[SCROLL, SCROLL_END];

/// Scrollable container widget.
#[derive(Debug, Clone)]
pub struct ScrollView {
    pub style: BaseStyle,
    pub shows_vertical_indicator: bool,
    content_offset: (f64, f64),
    listeners: ListenerSet,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self {
            style: BaseStyle::default(),
            shows_vertical_indicator: true,
            content_offset: (0.0, 0.0),
            listeners: ListenerSet::new(),
        }
    }
}

impl ScrollView {
    pub fn content_offset(&self) -> (f64, f64) {
        self.content_offset
    }

    /// Native scroll callback: moves the content and reports `scroll`.
    pub fn scroll_to(&mut self, x: f64, y: f64) -> bool {
        self.content_offset = (x, y);
        self.listeners.fire(SCROLL, self.offset_data())
    }

    /// Native deceleration-finished callback: reports `scrollEnd`.
    pub fn end_scroll(&self) -> bool {
        self.listeners.fire(SCROLL_END, self.offset_data())
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    fn offset_data(&self) -> PropertySet {
        let (x, y) = self.content_offset;
        PropertySet::new().with("contentOffset", PropertySet::new().with("x", x).with("y", y))
    }
}

impl NativeView for ScrollView {
    fn type_name(&self) -> &'static str {
        KIND
    }

    fn snapshot(&self) -> PropertySet {
        let mut out = PropertySet::new();
        self.style.write_snapshot(&mut out);
        out.insert("showsVerticalScrollIndicator", self.shows_vertical_indicator);
        out.extend(self.offset_data());
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct ScrollPatch {
    base: BasePatch,
    shows_vertical_indicator: Option<bool>,
}

impl ScrollPatch {
    fn from_props(props: &PropertySet) -> Result<Self, PropError> {
        Ok(Self {
            base: BasePatch::from_props(props)?,
            shows_vertical_indicator: props.opt_bool("showsVerticalScrollIndicator")?,
        })
    }

    fn apply(self, view: &mut ScrollView) {
        self.base.apply(&mut view.style);
        if let Some(shows) = self.shows_vertical_indicator {
            view.shows_vertical_indicator = shows;
        }
    }
}

pub struct ScrollHandler;

impl ComponentHandler for ScrollHandler {
    fn create(&self, props: &PropertySet) -> Result<Box<dyn NativeView>, HandlerError> {
        let patch = ScrollPatch::from_props(props)?;
        let mut view = ScrollView::default();
        patch.apply(&mut view);
        Ok(Box::new(view))
    }

    fn update(&self, view: &mut dyn NativeView, props: &PropertySet) -> Result<(), HandlerError> {
        let patch = ScrollPatch::from_props(props)?;
        patch.apply(expect_view::<ScrollView>(view, KIND)?);
        Ok(())
    }

    fn attach_listeners(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        event_types: &[String],
        emitter: &EventEmitter,
    ) -> Result<(), HandlerError> {
        let scroll = expect_view::<ScrollView>(view, KIND)?;
        install_listeners(
            &mut scroll.listeners,
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
        let scroll = expect_view::<ScrollView>(view, KIND)?;
        remove_listeners(&mut scroll.listeners, event_types);
        Ok(())
    }

    fn supported_events(&self) -> &'static [&'static str] {
        EVENTS
    }
}
