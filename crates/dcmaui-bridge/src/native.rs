use crate::props::PropertySet;
use std::any::Any;
use std::fmt;

/// A live widget instance owned by the view registry.
///
/// Rendering is done by the host toolkit; the bridge only needs to hand
/// views to their component handler and to the root container.
pub trait NativeView: Any + Send {
    /// Short widget class name, used in diagnostics and tree dumps.
    fn type_name(&self) -> &'static str;

    /// Current widget state as properties (for view info queries).
    fn snapshot(&self) -> PropertySet;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn NativeView {
    pub fn downcast_ref<T: NativeView>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: NativeView>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: NativeView>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl fmt::Debug for dyn NativeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// The platform attachment point the reserved root view is mounted into.
pub trait RootContainer: Send {
    fn mount(&mut self, view_id: &str, view: &dyn NativeView);

    fn unmount(&mut self, view_id: &str);
}

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Parse `#RRGGBB` (the `#` is optional). Malformed input yields black.
    pub fn from_hex(input: &str) -> Color {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            tracing::warn!(color = input, "unparseable color, using black");
            return Color::BLACK;
        }
        match u32::from_str_radix(hex, 16) {
            Ok(rgb) => Color {
                r: ((rgb >> 16) & 0xFF) as u8,
                g: ((rgb >> 8) & 0xFF) as u8,
                b: (rgb & 0xFF) as u8,
            },
            Err(_) => Color::BLACK,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
