pub mod bridge;
pub mod command;
pub mod component;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod ffi;
pub mod lua;
pub mod native;
pub mod props;
pub mod stub;
pub mod view;

use smartstring::alias::String as SmartString;

/// Caller-supplied view identifier, unique among live views.
pub type ViewId = SmartString;

/// Name of a registered component handler, e.g. `"Button"`.
pub type ComponentKind = SmartString;

// Re-export key types
pub use bridge::{Bridge, SharedBridge};
pub use command::{Command, CommandOutput};
pub use component::{ComponentHandler, ComponentRegistry, HandlerError};
pub use config::{BridgeConfig, DuplicatePolicy, EventDelivery};
pub use error::{BridgeError, Result};
pub use events::{BridgeEvent, EventEmitter, EventSink};
pub use lua::register_bridge_module;
pub use native::{Color, NativeView, RootContainer};
pub use props::{decode_id_list, decode_props, PropValue, PropertySet};
