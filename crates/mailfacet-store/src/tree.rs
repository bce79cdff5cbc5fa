//! The consumed source-tree interface.

use crate::{AttrValue, NodeHandle, PartLocator, Role, Uid};

/// The narrow surface through which the model layer consumes a mail-store
/// tree.
///
/// Implementations own node identity, MIME structure, and whatever fetching
/// or caching machinery populates the tree; consumers see only handles,
/// total attribute reads, and change events delivered out of band. All
/// methods must tolerate stale and foreign handles by answering with
/// emptiness (`false`, defaults, `None`) rather than panicking.
pub trait SourceTree {
    /// Identity of this tree instance.
    ///
    /// Handles minted by this tree carry the same id; a mismatch marks a
    /// handle from another tree.
    fn tree_id(&self) -> crate::TreeId;

    /// Returns true if `node` belongs to this tree and still exists.
    fn is_valid(&self, node: NodeHandle) -> bool;

    /// Reads one attribute of `node`.
    ///
    /// Total: stale handles, foreign handles, and unmaterialized attributes
    /// all read as [`Role::default_value`].
    fn attribute_of(&self, node: NodeHandle, role: Role) -> AttrValue;

    /// The children of `node`, in structural order. Empty for stale handles
    /// and leaves.
    fn children_of(&self, node: NodeHandle) -> Vec<NodeHandle>;

    /// The structural parent of `node`, or `None` for the root and for
    /// foreign handles.
    ///
    /// Implementations should keep answering for recently discarded nodes:
    /// the notification that discards a subtree names a node that no longer
    /// validates, and scoped observers classify it by ancestry.
    fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle>;

    /// Resolves a (mailbox, UID) pair to the message's node.
    ///
    /// Returns `None` when the store knows no such message.
    fn lookup_message(&self, mailbox: &str, uid: Uid) -> Option<NodeHandle>;

    /// Mints the stable locator for `node`, or `None` for stale handles.
    ///
    /// The locator stays resolvable for as long as the node's enclosing
    /// message structure survives.
    fn locator_for(&self, node: NodeHandle) -> Option<PartLocator>;

    /// Resolves a locator back to its node.
    ///
    /// Round-trip contract: for any live `node`,
    /// `resolve_locator(&locator_for(node)?) == Some(node)`.
    fn resolve_locator(&self, locator: &PartLocator) -> Option<NodeHandle>;

    /// Returns true if `ancestor` lies strictly above `node`.
    ///
    /// The default implementation walks the parent chain; implementations
    /// with cheaper structural knowledge may override it.
    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        if ancestor == node {
            return false;
        }
        let mut current = self.parent_of(node);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent_of(parent);
        }
        false
    }
}
