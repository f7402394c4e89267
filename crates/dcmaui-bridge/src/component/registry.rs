use super::ComponentHandler;
use crate::components;
use smartstring::alias::String as SmartString;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps component kind names to their handlers.
#[derive(Clone)]
pub struct ComponentRegistry {
    handlers: HashMap<SmartString, Arc<dyn ComponentHandler>>,
}

impl ComponentRegistry {
    /// Registry with the built-in kinds (`View`, `Text`, `Button`, `Image`, `ScrollView`).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        components::register_builtins(&mut registry);
        registry
    }

    /// Registry with no kinds at all.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler, replacing and returning any existing one for `kind`.
    pub fn register(
        &mut self,
        kind: &str,
        handler: Arc<dyn ComponentHandler>,
    ) -> Option<Arc<dyn ComponentHandler>> {
        let previous = self.handlers.insert(kind.into(), handler);
        if previous.is_some() {
            tracing::debug!(kind, "replaced component handler");
        } else {
            tracing::debug!(kind, "registered component handler");
        }
        previous
    }

    pub fn resolve(&self, kind: &str) -> Option<Arc<dyn ComponentHandler>> {
        self.handlers.get(kind).cloned()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
