use crate::component::HandlerError;
use crate::props::DecodeError;
use thiserror::Error;

/// Errors reported by the bridge command surface.
///
/// None of these are fatal: a failed command leaves the view registry exactly
/// as it was before the call.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("bridge is not initialized")]
    NotInitialized,

    #[error("failed to decode payload: {0}")]
    PayloadDecode(#[from] DecodeError),

    #[error("unknown component kind '{0}'")]
    UnknownComponentKind(String),

    #[error("view not found: {0}")]
    UnknownViewId(String),

    #[error("view id '{0}' is already registered")]
    DuplicateId(String),

    #[error("failed to create {kind} view '{id}': {source}")]
    ViewCreation {
        id: String,
        kind: String,
        #[source]
        source: HandlerError,
    },

    #[error("failed to update view '{id}': {source}")]
    ViewUpdate {
        id: String,
        #[source]
        source: HandlerError,
    },

    #[error("failed to change listeners on '{id}': {source}")]
    Listener {
        id: String,
        #[source]
        source: HandlerError,
    },

    #[error("cannot attach '{child}' to '{parent}': {reason}")]
    InvalidHierarchy {
        child: String,
        parent: String,
        reason: &'static str,
    },

    #[error("invalid bridge configuration: {0}")]
    Config(String),
}

impl BridgeError {
    /// Stable machine-readable code, used by the C and Lua surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::NotInitialized => "NOT_INITIALIZED",
            BridgeError::PayloadDecode(_) => "PAYLOAD_DECODE_ERROR",
            BridgeError::UnknownComponentKind(_) => "UNKNOWN_COMPONENT_KIND",
            BridgeError::UnknownViewId(_) => "VIEW_NOT_FOUND",
            BridgeError::DuplicateId(_) => "DUPLICATE_ID",
            BridgeError::ViewCreation { .. } => "VIEW_CREATION_FAILED",
            BridgeError::ViewUpdate { .. } => "VIEW_UPDATE_FAILED",
            BridgeError::Listener { .. } => "LISTENER_FAILED",
            BridgeError::InvalidHierarchy { .. } => "INVALID_HIERARCHY",
            BridgeError::Config(_) => "INVALID_CONFIG",
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
