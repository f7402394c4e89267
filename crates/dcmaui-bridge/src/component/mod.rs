mod registry;

pub use registry::ComponentRegistry;

use crate::events::EventEmitter;
use crate::native::NativeView;
use crate::props::{PropError, PropertySet};
use thiserror::Error;

/// Failure reported by a component handler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandlerError {
    #[error(transparent)]
    InvalidProps(#[from] PropError),

    #[error("expected a {expected} view, found {found}")]
    WrongViewType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("native failure: {0}")]
    Native(String),

    #[error("handler panicked: {0}")]
    Panicked(String),
}

/// Capability object responsible for one component kind.
///
/// Handlers construct and mutate native views but never touch bridge state;
/// the bridge records whatever `create` returns.
pub trait ComponentHandler: Send + Sync {
    /// Build a new view from a full property set.
    fn create(&self, props: &PropertySet) -> Result<Box<dyn NativeView>, HandlerError>;

    /// Apply only the fields present in `props`; omitted fields keep their value.
    fn update(&self, view: &mut dyn NativeView, props: &PropertySet) -> Result<(), HandlerError>;

    /// Install callbacks for `event_types`. Attaching an already attached type
    /// replaces the previous listener; types this kind never emits are ignored.
    fn attach_listeners(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        event_types: &[String],
        emitter: &EventEmitter,
    ) -> Result<(), HandlerError>;

    /// Remove callbacks for `event_types`. Types with no active listener are ignored.
    fn detach_listeners(
        &self,
        view: &mut dyn NativeView,
        view_id: &str,
        event_types: &[String],
    ) -> Result<(), HandlerError>;

    /// Event types this kind can emit.
    fn supported_events(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Downcast helper shared by handlers that manage a single widget type.
pub fn expect_view<'a, T: NativeView>(
    view: &'a mut dyn NativeView,
    expected: &'static str,
) -> Result<&'a mut T, HandlerError> {
    let found = view.type_name();
    view.downcast_mut::<T>()
        .ok_or(HandlerError::WrongViewType { expected, found })
}
