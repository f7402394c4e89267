use crate::native::Color;
use crate::props::{PropError, PropertySet};

/// Properties every built-in widget accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseStyle {
    pub background_color: Option<Color>,
    pub padding: Option<u32>,
}

impl BaseStyle {
    pub fn write_snapshot(&self, out: &mut PropertySet) {
        if let Some(color) = self.background_color {
            out.insert("backgroundColor", color.to_hex());
        }
        if let Some(padding) = self.padding {
            out.insert("padding", i64::from(padding));
        }
    }
}

/// Validated base-style fields from one payload.
#[derive(Debug, Clone, Default)]
pub struct BasePatch {
    background_color: Option<Color>,
    padding: Option<u32>,
}

impl BasePatch {
    pub fn from_props(props: &PropertySet) -> Result<Self, PropError> {
        let padding = match props.opt_i64("padding")? {
            Some(p) => Some(u32::try_from(p).map_err(|_| PropError::Invalid {
                key: "padding".into(),
                reason: format!("{p} is out of range"),
            })?),
            None => None,
        };

        Ok(Self {
            background_color: props.opt_str("backgroundColor")?.map(Color::from_hex),
            padding,
        })
    }

    pub fn apply(&self, style: &mut BaseStyle) {
        if let Some(color) = self.background_color {
            style.background_color = Some(color);
        }
        if let Some(padding) = self.padding {
            style.padding = Some(padding);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::decode_props;

    #[test]
    fn test_partial_patch_keeps_other_fields() {
        let mut style = BaseStyle::default();
        BasePatch::from_props(&decode_props(r##"{"backgroundColor":"#112233","padding":4}"##).unwrap())
            .unwrap()
            .apply(&mut style);

        BasePatch::from_props(&decode_props(r#"{"padding":8}"#).unwrap())
            .unwrap()
            .apply(&mut style);

        assert_eq!(style.padding, Some(8));
        assert_eq!(style.background_color, Some(Color::from_hex("#112233")));
    }

    #[test]
    fn test_negative_padding_rejected() {
        let err = BasePatch::from_props(&decode_props(r#"{"padding":-1}"#).unwrap()).unwrap_err();
        assert!(matches!(err, PropError::Invalid { .. }));
    }
}
