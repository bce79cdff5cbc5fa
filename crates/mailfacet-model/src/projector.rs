//! Subtree projection over a source tree.

use mailfacet_store::{AttrValue, NodeHandle, Role, SourceTree, TreeEvent};

/// What a source-tree event means inside the projected subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtreeEvent {
    /// Data inside the subtree changed; re-read what you display.
    Changed,
    /// The subtree's root itself changed or the structure around it was
    /// rebuilt; treat everything you knew as gone.
    Reset,
}

/// A re-rootable view onto the portion of a source tree below one node.
///
/// The projector is a scoping filter, not a data structure: it holds the
/// current root handle and a borrow of the tree, and answers two questions:
/// what does the subtree contain, and does this tree-wide event concern it.
/// Events outside the rooted subtree are suppressed entirely, which is what
/// lets a consumer treat a forwarded event as "this message's visible data
/// changed" rather than "something, somewhere changed".
///
/// An absent or stale root is not an error: the projection is then empty and
/// reads as a blank message (no children, default attributes).
#[derive(Debug)]
pub struct SubtreeProjector<'t, T: SourceTree> {
    tree: &'t T,
    root: Option<NodeHandle>,
}

impl<'t, T: SourceTree> SubtreeProjector<'t, T> {
    /// Creates an unrooted (empty) projection over `tree`.
    pub const fn new(tree: &'t T) -> Self {
        Self { tree, root: None }
    }

    /// The projected tree.
    pub const fn tree(&self) -> &'t T {
        self.tree
    }

    /// The current root, if any.
    #[must_use]
    pub const fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    /// Re-bases the projection onto `root`.
    ///
    /// The projector is re-rooted in place over its lifetime, never
    /// recreated, so observers attached to its owner survive selection
    /// changes.
    pub fn set_root(&mut self, root: Option<NodeHandle>) {
        self.root = root;
    }

    /// Returns true if the projection shows nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.root.is_some_and(|root| self.tree.is_valid(root))
    }

    /// Reads one attribute off the projection root.
    ///
    /// An empty projection reads as the role's default.
    #[must_use]
    pub fn attribute(&self, role: Role) -> AttrValue {
        match self.root {
            Some(root) if self.tree.is_valid(root) => self.tree.attribute_of(root, role),
            _ => role.default_value(),
        }
    }

    /// The children of the projection root; empty for an empty projection.
    #[must_use]
    pub fn children(&self) -> Vec<NodeHandle> {
        match self.root {
            Some(root) => self.tree.children_of(root),
            None => Vec::new(),
        }
    }

    /// Returns true if `node` is the projection root or lies below it.
    #[must_use]
    pub fn contains(&self, node: NodeHandle) -> bool {
        self.root
            .is_some_and(|root| node == root || self.tree.is_ancestor(root, node))
    }

    /// Classifies a source-tree event against the projected subtree.
    ///
    /// This is the scoping predicate:
    /// - a change to the root itself, or a reset at or above it (which
    ///   covers a full source-tree reset), projects as [`SubtreeEvent::Reset`];
    /// - a change or reset strictly below the root projects as
    ///   [`SubtreeEvent::Changed`];
    /// - everything else (including everything while unrooted) is
    ///   suppressed (`None`).
    ///
    /// Classification is structural, so the reset that discards the rooted
    /// subtree still projects even though the root no longer validates.
    #[must_use]
    pub fn project(&self, event: &TreeEvent) -> Option<SubtreeEvent> {
        let root = self.root?;
        match *event {
            TreeEvent::NodeChanged(node) if node == root => Some(SubtreeEvent::Reset),
            TreeEvent::NodeChanged(node) if self.tree.is_ancestor(root, node) => {
                Some(SubtreeEvent::Changed)
            }
            TreeEvent::SubtreeReset(node)
                if node == root || self.tree.is_ancestor(node, root) =>
            {
                Some(SubtreeEvent::Reset)
            }
            TreeEvent::SubtreeReset(node) if self.tree.is_ancestor(root, node) => {
                Some(SubtreeEvent::Changed)
            }
            _ => None,
        }
    }
}
