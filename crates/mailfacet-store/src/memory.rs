//! In-memory source tree.
//!
//! [`MemoryTree`] is the reference [`SourceTree`] implementation: an
//! arena-backed tree with interior mutability, so mutation flows through the
//! same shared borrow that read-side consumers hold. Mutators hand back the
//! [`TreeEvent`] they caused; the owning control flow pumps it to whoever is
//! observing, which keeps notification delivery explicit and synchronous.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{AttrValue, NodeHandle, NodeId, PartLocator, Role, SourceTree, TreeEvent, TreeId, Uid};

/// One arena slot.
///
/// Slots are never reused and children keep their slot position after a
/// sibling is discarded, so position paths stay stable for the lifetime of
/// the surrounding structure.
#[derive(Debug)]
struct NodeEntry {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: HashMap<Role, AttrValue>,
    alive: bool,
}

impl NodeEntry {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            attrs: HashMap::new(),
            alive: true,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    nodes: Vec<NodeEntry>,
    index: HashMap<(String, u32), NodeId>,
}

/// An in-memory mail-store tree.
///
/// Serves as the canonical [`SourceTree`] and as the test double for the
/// model layer. The root node stands for the store itself; messages hang off
/// it and MIME parts hang off their messages.
#[derive(Debug)]
pub struct MemoryTree {
    id: TreeId,
    inner: RefCell<Inner>,
}

impl MemoryTree {
    /// Creates an empty tree containing only its root node.
    #[must_use]
    pub fn new() -> Self {
        let mut inner = Inner::default();
        inner.nodes.push(NodeEntry::new(None));
        Self {
            id: TreeId::next(),
            inner: RefCell::new(inner),
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeHandle {
        NodeHandle::new(self.id, NodeId(0))
    }

    /// Appends a child under `parent`.
    ///
    /// Returns `None` when `parent` is stale or from another tree.
    #[must_use]
    pub fn add_child(&self, parent: NodeHandle) -> Option<NodeHandle> {
        if !self.is_valid(parent) {
            return None;
        }
        let mut inner = self.inner.borrow_mut();
        let id = NodeId(u32::try_from(inner.nodes.len()).ok()?);
        inner.nodes.push(NodeEntry::new(Some(parent.id())));
        let parent_slot = parent.id().get() as usize;
        inner.nodes[parent_slot].children.push(id);
        Some(NodeHandle::new(self.id, id))
    }

    /// Sets one attribute of `node` and reports the resulting event.
    ///
    /// Returns `None` without mutating when `node` is stale or `value` is
    /// not of the kind `role` carries.
    pub fn set_attribute(&self, node: NodeHandle, role: Role, value: AttrValue) -> Option<TreeEvent> {
        if !self.is_valid(node) || !role.accepts(&value) {
            return None;
        }
        let mut inner = self.inner.borrow_mut();
        inner.nodes[node.id().get() as usize].attrs.insert(role, value);
        Some(TreeEvent::NodeChanged(node))
    }

    /// Discards `node` and everything below it.
    ///
    /// Handles into the discarded subtree go stale; sibling positions are
    /// unaffected. Returns the reset event for the discarded subtree, or
    /// `None` when `node` was already stale or is the root (the root cannot
    /// be discarded; use [`Self::reset`]).
    pub fn remove(&self, node: NodeHandle) -> Option<TreeEvent> {
        if !self.is_valid(node) || node == self.root() {
            return None;
        }
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        let mut pending = vec![node.id()];
        while let Some(id) = pending.pop() {
            let entry = &mut inner.nodes[id.get() as usize];
            entry.alive = false;
            pending.extend(entry.children.iter().copied());
        }
        let nodes = &inner.nodes;
        inner.index.retain(|_, id| inner_alive(nodes, *id));
        Some(TreeEvent::SubtreeReset(node))
    }

    /// Discards everything below the root.
    ///
    /// The root itself stays valid; every other handle goes stale and the
    /// message index is cleared. Returns the full-reset event.
    pub fn reset(&self) -> TreeEvent {
        let mut inner = self.inner.borrow_mut();
        for entry in inner.nodes.iter_mut().skip(1) {
            entry.alive = false;
        }
        inner.index.clear();
        TreeEvent::SubtreeReset(self.root())
    }

    /// Registers `node` as the message `uid` in `mailbox`.
    ///
    /// Backs [`SourceTree::lookup_message`]. A stale `node` is ignored.
    pub fn index_message(&self, mailbox: &str, uid: Uid, node: NodeHandle) {
        if !self.is_valid(node) {
            return;
        }
        self.inner
            .borrow_mut()
            .index
            .insert((mailbox.to_string(), uid.get()), node.id());
    }

    fn owns(&self, node: NodeHandle) -> bool {
        node.tree_id() == self.id
            && (node.id().get() as usize) < self.inner.borrow().nodes.len()
    }
}

fn inner_alive(nodes: &[NodeEntry], id: NodeId) -> bool {
    nodes
        .get(id.get() as usize)
        .is_some_and(|entry| entry.alive)
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTree for MemoryTree {
    fn tree_id(&self) -> TreeId {
        self.id
    }

    fn is_valid(&self, node: NodeHandle) -> bool {
        self.owns(node) && inner_alive(&self.inner.borrow().nodes, node.id())
    }

    fn attribute_of(&self, node: NodeHandle, role: Role) -> AttrValue {
        if !self.is_valid(node) {
            return role.default_value();
        }
        self.inner.borrow().nodes[node.id().get() as usize]
            .attrs
            .get(&role)
            .cloned()
            .unwrap_or_else(|| role.default_value())
    }

    fn children_of(&self, node: NodeHandle) -> Vec<NodeHandle> {
        if !self.is_valid(node) {
            return Vec::new();
        }
        let inner = self.inner.borrow();
        inner.nodes[node.id().get() as usize]
            .children
            .iter()
            .filter(|id| inner_alive(&inner.nodes, **id))
            .map(|id| NodeHandle::new(self.id, *id))
            .collect()
    }

    fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle> {
        if !self.owns(node) {
            return None;
        }
        // Discarded nodes keep their structural parent so that the reset
        // notification naming them can still be classified by ancestry.
        self.inner.borrow().nodes[node.id().get() as usize]
            .parent
            .map(|id| NodeHandle::new(self.id, id))
    }

    fn lookup_message(&self, mailbox: &str, uid: Uid) -> Option<NodeHandle> {
        let inner = self.inner.borrow();
        let id = *inner.index.get(&(mailbox.to_string(), uid.get()))?;
        inner_alive(&inner.nodes, id).then(|| NodeHandle::new(self.id, id))
    }

    fn locator_for(&self, node: NodeHandle) -> Option<PartLocator> {
        if !self.is_valid(node) {
            return None;
        }
        let inner = self.inner.borrow();
        let mut positions = Vec::new();
        let mut current = node.id();
        while let Some(parent) = inner.nodes[current.get() as usize].parent {
            let slot = inner.nodes[parent.get() as usize]
                .children
                .iter()
                .position(|id| *id == current)?;
            positions.push(slot);
            current = parent;
        }
        positions.reverse();
        if positions.is_empty() {
            return Some(PartLocator::new("/"));
        }
        let mut path = String::new();
        for position in positions {
            path.push('/');
            path.push_str(&position.to_string());
        }
        Some(PartLocator::new(path))
    }

    fn resolve_locator(&self, locator: &PartLocator) -> Option<NodeHandle> {
        let inner = self.inner.borrow();
        let mut current = NodeId(0);
        for segment in locator.as_str().split('/').filter(|s| !s.is_empty()) {
            let slot: usize = segment.parse().ok()?;
            current = *inner.nodes[current.get() as usize].children.get(slot)?;
        }
        inner_alive(&inner.nodes, current).then(|| NodeHandle::new(self.id, current))
    }

    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        if !self.owns(ancestor) || !self.owns(node) || ancestor == node {
            return false;
        }
        // Raw structural links, deliberately ignoring aliveness: the event
        // that discarded a subtree must still classify against it.
        let inner = self.inner.borrow();
        let mut current = inner.nodes[node.id().get() as usize].parent;
        while let Some(id) = current {
            if id == ancestor.id() {
                return true;
            }
            current = inner.nodes[id.get() as usize].parent;
        }
        false
    }
}
