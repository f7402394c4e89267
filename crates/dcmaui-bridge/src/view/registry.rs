use crate::component::ComponentHandler;
use crate::error::{BridgeError, Result};
use crate::native::NativeView;
use crate::{ComponentKind, ViewId};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;

/// A live native view together with the kind and handler it was created with.
pub struct ViewEntry {
    view: Box<dyn NativeView>,
    kind: ComponentKind,
    handler: Arc<dyn ComponentHandler>,
}

impl ViewEntry {
    pub fn new(kind: &str, handler: Arc<dyn ComponentHandler>, view: Box<dyn NativeView>) -> Self {
        Self {
            view,
            kind: kind.into(),
            handler,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The handler pinned at creation time. Later registrations for the same
    /// kind do not affect existing views.
    pub fn handler(&self) -> Arc<dyn ComponentHandler> {
        Arc::clone(&self.handler)
    }

    pub fn view(&self) -> &dyn NativeView {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> &mut dyn NativeView {
        self.view.as_mut()
    }

    pub fn downcast_ref<T: NativeView>(&self) -> Option<&T> {
        self.view.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: NativeView>(&mut self) -> Option<&mut T> {
        self.view.downcast_mut::<T>()
    }
}

impl std::fmt::Debug for ViewEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewEntry")
            .field("kind", &self.kind)
            .field("view", &self.view.type_name())
            .finish()
    }
}

/// Authoritative mapping from view id to live view, plus the parent/child
/// links between them.
#[derive(Default)]
pub struct ViewRegistry {
    entries: HashMap<ViewId, ViewEntry>,
    /// Ordered children of each parent
    children: HashMap<ViewId, Vec<ViewId>>,
    /// Reverse link, child -> parent
    parents: HashMap<ViewId, ViewId>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new entry. Fails with `DuplicateId` if the id is live.
    pub fn insert(&mut self, id: &str, entry: ViewEntry) -> Result<()> {
        if self.entries.contains_key(id) {
            return Err(BridgeError::DuplicateId(id.to_string()));
        }
        self.entries.insert(id.into(), entry);
        Ok(())
    }

    /// Swap the entry under an existing or new id, keeping its hierarchy links.
    /// Returns the entry that was displaced.
    pub fn replace(&mut self, id: &str, entry: ViewEntry) -> Option<ViewEntry> {
        self.entries.insert(id.into(), entry)
    }

    pub fn get(&self, id: &str) -> Option<&ViewEntry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ViewEntry> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn children(&self, id: &str) -> &[ViewId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(|p| p.as_str())
    }

    /// Remove `id` and every view below it. Removing an absent id is a no-op.
    /// Returns the removed entries, the requested view first.
    pub fn remove(&mut self, id: &str) -> Vec<(ViewId, ViewEntry)> {
        if !self.entries.contains_key(id) {
            return Vec::new();
        }

        self.unlink(id);

        let mut removed = Vec::new();
        let mut stack: Vec<ViewId> = vec![id.into()];
        while let Some(current) = stack.pop() {
            if let Some(kids) = self.children.remove(&current) {
                // reversed so the first child is removed first
                stack.extend(kids.into_iter().rev());
            }
            self.parents.remove(&current);
            if let Some(entry) = self.entries.remove(&current) {
                removed.push((current, entry));
            }
        }
        removed
    }

    /// Move `child` under `parent` at `index`, clamped to the child count.
    pub fn attach_child(&mut self, child: &str, parent: &str, index: usize) -> Result<()> {
        self.check_link(child, parent)?;

        self.unlink(child);
        let siblings = self.children.entry(parent.into()).or_default();
        let index = index.min(siblings.len());
        siblings.insert(index, child.into());
        self.parents.insert(child.into(), parent.into());
        Ok(())
    }

    /// Replace the ordered child list of `parent`. Validates everything first;
    /// on error nothing changes.
    pub fn set_children(&mut self, parent: &str, child_ids: &[String]) -> Result<()> {
        if !self.entries.contains_key(parent) {
            return Err(BridgeError::UnknownViewId(parent.to_string()));
        }
        let mut seen = HashSet::with_capacity(child_ids.len());
        for child in child_ids {
            self.check_link(child, parent)?;
            if !seen.insert(child.as_str()) {
                return Err(BridgeError::InvalidHierarchy {
                    child: child.clone(),
                    parent: parent.to_string(),
                    reason: "child listed more than once",
                });
            }
        }

        // Former children that are not kept become detached, not destroyed.
        if let Some(previous) = self.children.remove(parent) {
            for old in previous {
                if !seen.contains(old.as_str()) {
                    self.parents.remove(&old);
                }
            }
        }
        for child in child_ids {
            if self.parent(child) != Some(parent) {
                self.unlink(child);
            }
            self.parents.insert(child.as_str().into(), parent.into());
        }
        self.children.insert(
            parent.into(),
            child_ids.iter().map(|c| ViewId::from(c.as_str())).collect(),
        );
        Ok(())
    }

    /// Render the forest of registered views, one line per view, children
    /// indented under their parent.
    pub fn describe_hierarchy(&self) -> String {
        let mut out = String::new();
        for root in self.ids().into_iter().filter(|id| self.parent(id).is_none()) {
            self.describe_into(root, 0, &mut out);
        }
        out
    }

    /// Render the subtree rooted at `id`; empty when `id` is absent.
    pub fn describe(&self, id: &str) -> String {
        let mut out = String::new();
        if self.contains(id) {
            self.describe_into(id, 0, &mut out);
        }
        out
    }

    fn describe_into(&self, id: &str, depth: usize, out: &mut String) {
        let Some(entry) = self.entries.get(id) else {
            return;
        };
        let _ = writeln!(out, "{}{} ({})", "  ".repeat(depth), id, entry.kind());
        for child in self.children(id) {
            self.describe_into(child, depth + 1, out);
        }
    }

    fn check_link(&self, child: &str, parent: &str) -> Result<()> {
        if !self.entries.contains_key(parent) {
            return Err(BridgeError::UnknownViewId(parent.to_string()));
        }
        if !self.entries.contains_key(child) {
            return Err(BridgeError::UnknownViewId(child.to_string()));
        }
        let reason = if child == parent {
            "a view cannot contain itself"
        } else if self.is_ancestor(child, parent) {
            "the move would create a cycle"
        } else {
            return Ok(());
        };
        Err(BridgeError::InvalidHierarchy {
            child: child.to_string(),
            parent: parent.to_string(),
            reason,
        })
    }

    /// True when `candidate` sits somewhere above `id`.
    fn is_ancestor(&self, candidate: &str, id: &str) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == candidate {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    fn unlink(&mut self, child: &str) {
        if let Some(parent) = self.parents.remove(child) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|c| c.as_str() != child);
                if siblings.is_empty() {
                    self.children.remove(&parent);
                }
            }
        }
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("views", &self.ids())
            .finish()
    }
}
