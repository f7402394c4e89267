use super::base::{BasePatch, BaseStyle};
use super::ignore_listeners;
use crate::component::{expect_view, ComponentHandler, HandlerError};
use crate::events::EventEmitter;
use crate::native::{Color, NativeView};
use crate::props::{PropError, PropertySet};
use std::any::Any;

pub const KIND: &str = "Text";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Unknown alignments fall back to left.
    pub fn parse(value: &str) -> Self {
        match value {
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Label widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextView {
    pub style: BaseStyle,
    pub content: String,
    pub font_size: Option<u32>,
    pub color: Option<Color>,
    pub text_align: TextAlign,
}

impl NativeView for TextView {
    fn type_name(&self) -> &'static str {
        KIND
    }

    fn snapshot(&self) -> PropertySet {
        let mut out = PropertySet::new();
        self.style.write_snapshot(&mut out);
        out.insert("content", self.content.as_str());
        if let Some(size) = self.font_size {
            out.insert("fontSize", i64::from(size));
        }
        if let Some(color) = self.color {
            out.insert("color", color.to_hex());
        }
        out.insert("textAlign", self.text_align.as_str());
        out
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct TextPatch {
    base: BasePatch,
    content: Option<String>,
    font_size: Option<u32>,
    color: Option<Color>,
    text_align: Option<TextAlign>,
}

impl TextPatch {
    fn from_props(props: &PropertySet) -> Result<Self, PropError> {
        let font_size = match props.opt_i64("fontSize")? {
            Some(size) if size > 0 => Some(u32::try_from(size).map_err(|_| PropError::Invalid {
                key: "fontSize".into(),
                reason: format!("{size} is out of range"),
            })?),
            Some(size) => {
                return Err(PropError::Invalid {
                    key: "fontSize".into(),
                    reason: format!("{size} must be positive"),
                });
            }
            None => None,
        };

        Ok(Self {
            base: BasePatch::from_props(props)?,
            content: props.opt_str("content")?.map(str::to_string),
            font_size,
            color: props.opt_str("color")?.map(Color::from_hex),
            text_align: props.opt_str("textAlign")?.map(TextAlign::parse),
        })
    }

    fn apply(self, view: &mut TextView) {
        self.base.apply(&mut view.style);
        if let Some(content) = self.content {
            view.content = content;
        }
        if let Some(size) = self.font_size {
            view.font_size = Some(size);
        }
        if let Some(color) = self.color {
            view.color = Some(color);
        }
        if let Some(align) = self.text_align {
            view.text_align = align;
        }
    }
}

pub struct TextHandler;

impl ComponentHandler for TextHandler {
    fn create(&self, props: &PropertySet) -> Result<Box<dyn NativeView>, HandlerError> {
        let patch = TextPatch::from_props(props)?;
        let mut view = TextView::default();
        patch.apply(&mut view);
        Ok(Box::new(view))
    }

    fn update(&self, view: &mut dyn NativeView, props: &PropertySet) -> Result<(), HandlerError> {
        let patch = TextPatch::from_props(props)?;
        patch.apply(expect_view::<TextView>(view, KIND)?);
        Ok(())
    }

    fn attach_listeners(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        event_types: &[String],
        _emitter: &EventEmitter,
    ) -> Result<(), HandlerError> {
        expect_view::<TextView>(view, KIND)?;
        ignore_listeners(KIND, view_id, event_types);
        Ok(())
    }

    fn detach_listeners(
        &self,
        view: &mut dyn NativeView,
        _view_id: &str,
        _event_types: &[String],
    ) -> Result<(), HandlerError> {
        expect_view::<TextView>(view, KIND)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BoxView;
    use crate::props::decode_props;

    #[test]
    fn test_partial_update() {
        let handler = TextHandler;
        let mut view = handler
            .create(
                &decode_props(r##"{"content":"Hello","color":"#00FF00","textAlign":"center"}"##)
                    .unwrap(),
            )
            .unwrap();

        handler
            .update(view.as_mut(), &decode_props(r#"{"content":"Bye"}"#).unwrap())
            .unwrap();

        let text = view.downcast_ref::<TextView>().unwrap();
        assert_eq!(text.content, "Bye");
        assert_eq!(text.color, Some(Color::from_hex("#00FF00")));
        assert_eq!(text.text_align, TextAlign::Center);
    }

    #[test]
    fn test_unknown_alignment_is_left() {
        let view = TextHandler
            .create(&decode_props(r#"{"textAlign":"justify"}"#).unwrap())
            .unwrap();
        assert_eq!(
            view.downcast_ref::<TextView>().unwrap().text_align,
            TextAlign::Left
        );
    }

    #[test]
    fn test_failed_update_leaves_view_untouched() {
        let handler = TextHandler;
        let mut view = handler
            .create(&decode_props(r#"{"content":"Keep","fontSize":12}"#).unwrap())
            .unwrap();

        let err = handler
            .update(
                view.as_mut(),
                &decode_props(r#"{"content":"Lost","fontSize":"huge"}"#).unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, HandlerError::InvalidProps(_)));

        let text = view.downcast_ref::<TextView>().unwrap();
        assert_eq!(text.content, "Keep");
        assert_eq!(text.font_size, Some(12));
    }

    #[test]
    fn test_update_rejects_foreign_view() {
        let mut view: Box<dyn NativeView> = Box::new(BoxView::default());
        let err = TextHandler
            .update(view.as_mut(), &PropertySet::new())
            .unwrap_err();
        assert_eq!(
            err,
            HandlerError::WrongViewType {
                expected: "Text",
                found: "View"
            }
        );
    }
}
