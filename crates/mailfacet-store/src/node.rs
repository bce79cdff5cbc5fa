//! Node and tree identifiers.
//!
//! Types for tree instances, node handles, and message UIDs.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one source-tree instance.
///
/// Every tree allocates a process-unique id at construction. Handles carry
/// the id of the tree that minted them, which lets consumers detect the
/// contract violation of mixing handles across trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u64);

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

impl TreeId {
    /// Allocates a fresh, process-unique tree id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identity of one node within a tree.
///
/// Node ids are assigned by the owning tree and are meaningless outside it.
/// They are never reused within one tree instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Returns the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to one element of a mail-store tree.
///
/// A handle is a `Copy` pair of the owning tree's identity and the node's
/// identity within it. It owns nothing: whether the node still exists is
/// asked of the tree ([`crate::SourceTree::is_valid`]) at each use, so a
/// handle held across mutations can go stale without becoming dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    tree: TreeId,
    node: NodeId,
}

impl NodeHandle {
    /// Creates a handle for `node` in the tree identified by `tree`.
    ///
    /// Intended for [`crate::SourceTree`] implementations; consumers obtain
    /// handles from a tree, never construct them.
    #[must_use]
    pub const fn new(tree: TreeId, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// Identity of the tree that minted this handle.
    #[must_use]
    pub const fn tree_id(self) -> TreeId {
        self.tree
    }

    /// Identity of the node within its tree.
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.node
    }
}

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.tree.get(), self.node)
    }
}

/// Unique identifier for a message within a mailbox.
///
/// UIDs are persistent identifiers assigned by the mail store; combined with
/// the mailbox name they identify a message across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid(pub NonZeroU32);

impl Uid {
    /// Creates a new UID.
    ///
    /// Returns `None` if the value is 0.
    #[must_use]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
