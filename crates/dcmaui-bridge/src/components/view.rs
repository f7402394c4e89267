use super::base::{BasePatch, BaseStyle};
use super::ignore_listeners;
use crate::component::{expect_view, ComponentHandler, HandlerError};
use crate::events::EventEmitter;
use crate::native::NativeView;
use crate::props::PropertySet;
use std::any::Any;

pub const KIND: &str = "View";

/// Generic container widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxView {
    pub style: BaseStyle,
}

impl NativeView for BoxView {
    fn type_name(&self) -> &'static str {
        KIND
    }

    fn snapshot(&self) -> PropertySet {
        let mut out = PropertySet::new();
        self.style.write_snapshot(&mut out);
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub struct ViewHandler;

impl ComponentHandler for ViewHandler {
    fn create(&self, props: &PropertySet) -> Result<Box<dyn NativeView>, HandlerError> {
        let patch = BasePatch::from_props(props)?;
        let mut view = BoxView::default();
        patch.apply(&mut view.style);
        Ok(Box::new(view))
    }

    fn update(&self, view: &mut dyn NativeView, props: &PropertySet) -> Result<(), HandlerError> {
        let patch = BasePatch::from_props(props)?;
        let view = expect_view::<BoxView>(view, KIND)?;
        patch.apply(&mut view.style);
        Ok(())
    }

    fn attach_listeners(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        event_types: &[String],
        _emitter: &EventEmitter,
    ) -> Result<(), HandlerError> {
        expect_view::<BoxView>(view, KIND)?;
        ignore_listeners(KIND, view_id, event_types);
        Ok(())
    }

    fn detach_listeners(
        &self,
        view: &mut dyn NativeView,
        _view_id: &str,
        _event_types: &[String],
    ) -> Result<(), HandlerError> {
        expect_view::<BoxView>(view, KIND)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::Color;
    use crate::props::decode_props;

    #[test]
    fn test_create_and_update() {
        let handler = ViewHandler;
        let mut view = handler
            .create(&decode_props(r##"{"backgroundColor":"#FF0000"}"##).unwrap())
            .unwrap();

        handler
            .update(view.as_mut(), &decode_props(r#"{"padding":12}"#).unwrap())
            .unwrap();

        let box_view = view.downcast_ref::<BoxView>().unwrap();
        assert_eq!(box_view.style.background_color, Some(Color::from_hex("#FF0000")));
        assert_eq!(box_view.style.padding, Some(12));
    }

    #[test]
    fn test_invalid_props_fail_creation() {
        let err = ViewHandler
            .create(&decode_props(r#"{"padding":"big"}"#).unwrap())
            .unwrap_err();
        assert!(matches!(err, HandlerError::InvalidProps(_)));
    }
}
