use crate::error::{BridgeError, Result};
use serde::Deserialize;

pub const DEFAULT_ROOT_VIEW_ID: &str = "root";

/// What `create_view` does when the id is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateId` and keep the existing view.
    #[default]
    Reject,
    /// Drop the existing view and install the new one under the same id.
    Replace,
}

/// How events raised by native views reach the event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventDelivery {
    /// Call the sink from whatever thread fired the native callback.
    #[default]
    Immediate,
    /// Buffer events until the host calls `Bridge::dispatch_events`.
    Queued,
}

impl EventDelivery {
    pub fn as_str(self) -> &'static str {
        match self {
            EventDelivery::Immediate => "immediate",
            EventDelivery::Queued => "queued",
        }
    }
}

/// Bridge settings, usually handed over by the host as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BridgeConfig {
    /// The reserved id that is mounted into the platform root container.
    pub root_view_id: String,
    pub duplicate_ids: DuplicatePolicy,
    pub event_delivery: EventDelivery,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            root_view_id: DEFAULT_ROOT_VIEW_ID.to_string(),
            duplicate_ids: DuplicatePolicy::default(),
            event_delivery: EventDelivery::default(),
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BridgeConfig =
            serde_json::from_str(json).map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.root_view_id.is_empty() {
            return Err(BridgeError::Config("rootViewId must not be empty".into()));
        }
        Ok(())
    }

    pub fn with_root_view_id(mut self, id: impl Into<String>) -> Self {
        self.root_view_id = id.into();
        self
    }

    pub fn with_duplicate_ids(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }

    pub fn with_event_delivery(mut self, delivery: EventDelivery) -> Self {
        self.event_delivery = delivery;
        self
    }
}
