//! Built-in component kinds.

mod base;
mod button;
mod image;
mod scroll;
mod text;
mod view;

pub use base::BaseStyle;
pub use button::{ButtonHandler, ButtonView};
pub use image::{Frame, ImageHandler, ImageView};
pub use scroll::{ScrollHandler, ScrollView};
pub use text::{TextAlign, TextHandler, TextView};
pub use view::{BoxView, ViewHandler};

use crate::component::ComponentRegistry;
use crate::events::{EventEmitter, Listener, ListenerSet};
use std::sync::Arc;

pub fn register_builtins(registry: &mut ComponentRegistry) {
    registry.register(view::KIND, Arc::new(ViewHandler));
    registry.register(text::KIND, Arc::new(TextHandler));
    registry.register(button::KIND, Arc::new(ButtonHandler));
    registry.register(image::KIND, Arc::new(ImageHandler));
    registry.register(scroll::KIND, Arc::new(ScrollHandler));
}

/// Used by kinds that emit no events at all.
fn ignore_listeners(kind: &str, view_id: &str, event_types: &[String]) {
    if !event_types.is_empty() {
        tracing::debug!(kind, view_id, ?event_types, "kind emits no events, ignoring listeners");
    }
}

fn install_listeners(
    listeners: &mut ListenerSet,
    supported: &[&str],
    kind: &str,
    view_id: &str,
    event_types: &[String],
    emitter: &EventEmitter,
) {
    for event_type in event_types {
        if supported.contains(&event_type.as_str()) {
            listeners.install(Listener::new(view_id, event_type, emitter));
        } else {
            tracing::debug!(kind, view_id, event_type = %event_type, "unsupported event type ignored");
        }
    }
}

fn remove_listeners(listeners: &mut ListenerSet, event_types: &[String]) {
    for event_type in event_types {
        listeners.remove(event_type);
    }
}
