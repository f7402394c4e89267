use super::base::{BasePatch, BaseStyle};
use super::ignore_listeners;
use crate::component::{expect_view, ComponentHandler, HandlerError};
use crate::events::EventEmitter;
use crate::native::NativeView;
use crate::props::{PropError, PropertySet};
use std::any::Any;

pub const KIND: &str = "Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
}

/// Bitmap widget. The source is resolved by the host toolkit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageView {
    pub style: BaseStyle,
    pub source: String,
    pub frame: Option<Frame>,
}

impl NativeView for ImageView {
    fn type_name(&self) -> &'static str {
        KIND
    }

    fn snapshot(&self) -> PropertySet {
        let mut out = PropertySet::new();
        self.style.write_snapshot(&mut out);
        out.insert("source", self.source.as_str());
        if let Some(frame) = self.frame {
            out.insert("width", i64::from(frame.width));
            out.insert("height", i64::from(frame.height));
        }
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct ImagePatch {
    base: BasePatch,
    source: Option<String>,
    frame: Option<Frame>,
}

fn dimension(props: &PropertySet, key: &str) -> Result<Option<u32>, PropError> {
    match props.opt_i64(key)? {
        Some(v) => u32::try_from(v).map(Some).map_err(|_| PropError::Invalid {
            key: key.to_string(),
            reason: format!("{v} is not a valid size"),
        }),
        None => Ok(None),
    }
}

impl ImagePatch {
    fn from_props(props: &PropertySet) -> Result<Self, PropError> {
        let frame = match (dimension(props, "width")?, dimension(props, "height")?) {
            (Some(width), Some(height)) => Some(Frame { width, height }),
            (None, None) => None,
            (Some(_), None) | (None, Some(_)) => {
                return Err(PropError::Invalid {
                    key: "width".into(),
                    reason: "width and height must be given together".into(),
                });
            }
        };

        Ok(Self {
            base: BasePatch::from_props(props)?,
            source: props.opt_str("source")?.map(str::to_string),
            frame,
        })
    }

    fn apply(self, view: &mut ImageView) {
        self.base.apply(&mut view.style);
        if let Some(source) = self.source {
            view.source = source;
        }
        if let Some(frame) = self.frame {
            view.frame = Some(frame);
        }
    }
}

pub struct ImageHandler;

impl ComponentHandler for ImageHandler {
    fn create(&self, props: &PropertySet) -> Result<Box<dyn NativeView>, HandlerError> {
        // An image needs something to show; later updates may change it.
        props.require_str("source")?;
        let patch = ImagePatch::from_props(props)?;
        let mut view = ImageView::default();
        patch.apply(&mut view);
        Ok(Box::new(view))
    }

    fn update(&self, view: &mut dyn NativeView, props: &PropertySet) -> Result<(), HandlerError> {
        let patch = ImagePatch::from_props(props)?;
        patch.apply(expect_view::<ImageView>(view, KIND)?);
        Ok(())
    }

    fn attach_listeners(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        event_types: &[String],
        _emitter: &EventEmitter,
    ) -> Result<(), HandlerError> {
        expect_view::<ImageView>(view, KIND)?;
        ignore_listeners(KIND, view_id, event_types);
        Ok(())
    }

    fn detach_listeners(
        &self,
        view: &mut dyn NativeView,
        _view_id: &str,
        _event_types: &[String],
    ) -> Result<(), HandlerError> {
        expect_view::<ImageView>(view, KIND)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::decode_props;

    #[test]
    fn test_source_required_on_create() {
        let err = ImageHandler
            .create(&decode_props(r#"{"width":10,"height":10}"#).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            HandlerError::InvalidProps(PropError::Missing { .. })
        ));
    }

    #[test]
    fn test_frame_needs_both_dimensions() {
        let handler = ImageHandler;
        let mut view = handler
            .create(&decode_props(r#"{"source":"logo.png","width":64,"height":32}"#).unwrap())
            .unwrap();

        assert!(handler
            .update(view.as_mut(), &decode_props(r#"{"width":10}"#).unwrap())
            .is_err());

        handler
            .update(view.as_mut(), &decode_props(r#"{"source":"icon.png"}"#).unwrap())
            .unwrap();

        let image = view.downcast_ref::<ImageView>().unwrap();
        assert_eq!(image.source, "icon.png");
        assert_eq!(
            image.frame,
            Some(Frame {
                width: 64,
                height: 32
            })
        );
    }
}
