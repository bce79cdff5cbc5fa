//! The message facade.

use chrono::{DateTime, Utc};
use mailfacet_store::{Address, NodeHandle, Role, SourceTree, TreeEvent, Uid};
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::main_part::MainPart;
use crate::projector::SubtreeProjector;
use crate::resolver::{MainPartResolver, Resolution, ResolveOutcome};

/// Presents one message out of a mail-store tree as scalar attributes plus a
/// main displayable part.
///
/// The facade owns a [`SubtreeProjector`] rooted at the currently selected
/// message and an externally supplied [`MainPartResolver`]. Selecting a
/// message re-roots the projection and re-runs resolution; mutations inside
/// the source tree surface as `attributes_changed` without ever re-running
/// resolution. All accessors are synchronous reads of already-materialized
/// data; the facade never fetches, blocks, or polls.
///
/// Attribute accessors read through the projection on demand; nothing is
/// cached, so they cannot go stale.
///
/// # Notifications
///
/// Two observer lists, dispatched synchronously from the mutating call:
///
/// - `attributes_changed`: the envelope or flags may have changed; re-read
///   the accessors.
/// - `main_part_changed`: the [`MainPart`] representation changed. Every
///   selection fires it twice: once announcing the [`MainPart::Unavailable`]
///   reset before resolution, once after the outcome is fully computed. The
///   reset firing always precedes the outcome firing of the same selection,
///   and because selection is synchronous, no firing of an older selection
///   can arrive after a newer one has begun.
pub struct MessageFacade<'t, T: SourceTree, R: MainPartResolver<T>> {
    projector: SubtreeProjector<'t, T>,
    resolver: R,
    main_part: MainPart,
    attributes_changed: Vec<Box<dyn FnMut()>>,
    main_part_changed: Vec<Box<dyn FnMut(&MainPart)>>,
}

impl<'t, T: SourceTree, R: MainPartResolver<T>> MessageFacade<'t, T, R> {
    /// Creates a facade over `tree` with nothing selected.
    pub const fn new(tree: &'t T, resolver: R) -> Self {
        Self {
            projector: SubtreeProjector::new(tree),
            resolver,
            main_part: MainPart::Unavailable,
            attributes_changed: Vec::new(),
            main_part_changed: Vec::new(),
        }
    }

    /// The tree this facade was constructed against.
    pub const fn tree(&self) -> &'t T {
        self.projector.tree()
    }

    /// The currently selected message, if any.
    ///
    /// The handle may have gone stale since selection; the facade then reads
    /// as a blank message.
    #[must_use]
    pub const fn selected(&self) -> Option<NodeHandle> {
        self.projector.root()
    }

    /// The current main-part representation.
    #[must_use]
    pub const fn main_part(&self) -> &MainPart {
        &self.main_part
    }

    /// Registers an observer for envelope/flag changes.
    pub fn on_attributes_changed(&mut self, observer: impl FnMut() + 'static) {
        self.attributes_changed.push(Box::new(observer));
    }

    /// Registers an observer for main-part changes.
    pub fn on_main_part_changed(&mut self, observer: impl FnMut(&MainPart) + 'static) {
        self.main_part_changed.push(Box::new(observer));
    }

    /// Selects `message`, or clears the selection with `None`.
    ///
    /// Re-roots the projection, announces the [`MainPart::Unavailable`]
    /// reset, and, for a live selection, runs main-part resolution and
    /// announces its outcome. Resolution is never memoized: selecting the
    /// same message again re-runs it and fires the full sequence again.
    ///
    /// A stale handle selects a blank message (default attributes, main part
    /// [`MainPart::Unavailable`]); resolution is skipped. A handle from a
    /// different tree is a caller bug: it asserts in debug builds and
    /// degrades to clearing the selection in release builds.
    pub fn select_message(&mut self, message: Option<NodeHandle>) {
        let message = self.guard_same_tree(message);
        debug!(selected = ?message, "selecting message");
        self.projector.set_root(message);
        self.emit_attributes_changed();
        self.set_main_part(MainPart::Unavailable);

        let Some(node) = message else {
            return;
        };
        if !self.tree().is_valid(node) {
            debug!(%node, "selected message is gone; presenting a blank message");
            return;
        }
        let resolution = self.resolver.resolve_main_part(self.projector.tree(), node);
        let main_part = self.map_resolution(node, resolution);
        self.set_main_part(main_part);
    }

    /// Selects the message identified by `mailbox` and `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageNotFound`] when the store knows no such
    /// message; the facade is left cleared, so the not-found case stays
    /// distinguishable from a found-but-empty message.
    pub fn select_message_by_uid(&mut self, mailbox: &str, uid: Uid) -> Result<()> {
        match self.tree().lookup_message(mailbox, uid) {
            Some(node) => {
                self.select_message(Some(node));
                Ok(())
            }
            None => {
                warn!(mailbox, %uid, "message lookup failed; clearing selection");
                self.select_message(None);
                Err(Error::MessageNotFound {
                    mailbox: mailbox.to_string(),
                    uid,
                })
            }
        }
    }

    /// Feeds one source-tree event through the subtree filter.
    ///
    /// Fires `attributes_changed` exactly once when the event concerns the
    /// selected message's subtree; suppresses it entirely otherwise. Never
    /// re-runs main-part resolution.
    pub fn handle_tree_event(&mut self, event: &TreeEvent) {
        if let Some(projected) = self.projector.project(event) {
            debug!(?event, ?projected, "tree event inside the selected subtree");
            self.emit_attributes_changed();
        }
    }

    /// Message date, or `None` when absent.
    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.projector.attribute(Role::Date).into_date()
    }

    /// Subject line; empty when absent.
    #[must_use]
    pub fn subject(&self) -> String {
        self.projector.attribute(Role::Subject).into_text()
    }

    /// `From` participants; empty when absent.
    #[must_use]
    pub fn from(&self) -> Vec<Address> {
        self.projector.attribute(Role::From).into_addresses()
    }

    /// `To` participants; empty when absent.
    #[must_use]
    pub fn to(&self) -> Vec<Address> {
        self.projector.attribute(Role::To).into_addresses()
    }

    /// `Cc` participants; empty when absent.
    #[must_use]
    pub fn cc(&self) -> Vec<Address> {
        self.projector.attribute(Role::Cc).into_addresses()
    }

    /// `Bcc` participants; empty when absent.
    #[must_use]
    pub fn bcc(&self) -> Vec<Address> {
        self.projector.attribute(Role::Bcc).into_addresses()
    }

    /// `Sender` participants; empty when absent.
    #[must_use]
    pub fn sender(&self) -> Vec<Address> {
        self.projector.attribute(Role::Sender).into_addresses()
    }

    /// `Reply-To` participants; empty when absent.
    #[must_use]
    pub fn reply_to(&self) -> Vec<Address> {
        self.projector.attribute(Role::ReplyTo).into_addresses()
    }

    /// Raw `In-Reply-To` header; empty when absent.
    #[must_use]
    pub fn in_reply_to(&self) -> Vec<u8> {
        self.projector.attribute(Role::InReplyTo).into_bytes()
    }

    /// Raw `Message-Id` header; empty when absent.
    #[must_use]
    pub fn message_id(&self) -> Vec<u8> {
        self.projector.attribute(Role::MessageId).into_bytes()
    }

    /// Whether the message is marked for deletion.
    #[must_use]
    pub fn is_marked_deleted(&self) -> bool {
        self.projector.attribute(Role::IsMarkedDeleted).as_bool()
    }

    /// Whether the message has been read.
    #[must_use]
    pub fn is_marked_read(&self) -> bool {
        self.projector.attribute(Role::IsMarkedRead).as_bool()
    }

    /// Whether the message has been forwarded.
    #[must_use]
    pub fn is_marked_forwarded(&self) -> bool {
        self.projector.attribute(Role::IsMarkedForwarded).as_bool()
    }

    /// Whether the message has been replied to.
    #[must_use]
    pub fn is_marked_replied(&self) -> bool {
        self.projector.attribute(Role::IsMarkedReplied).as_bool()
    }

    /// Whether the message is recent.
    #[must_use]
    pub fn is_marked_recent(&self) -> bool {
        self.projector.attribute(Role::IsMarkedRecent).as_bool()
    }

    /// Degrades a foreign-tree handle to a cleared selection.
    fn guard_same_tree(&self, message: Option<NodeHandle>) -> Option<NodeHandle> {
        let node = message?;
        let ours = self.tree().tree_id();
        debug_assert_eq!(
            node.tree_id(),
            ours,
            "selected node belongs to a different tree"
        );
        if node.tree_id() == ours {
            Some(node)
        } else {
            error!(%node, "selected node belongs to a different tree; clearing the selection");
            None
        }
    }

    /// Maps a resolver outcome onto the main-part representation.
    fn map_resolution(&self, message: NodeHandle, resolution: Resolution) -> MainPart {
        match resolution.outcome {
            ResolveOutcome::Found | ResolveOutcome::PartLoading => {
                let located = resolution
                    .located
                    .filter(|node| self.tree().is_valid(*node));
                debug_assert!(
                    located.is_some(),
                    "resolver reported a part without a usable located node"
                );
                located.and_then(|node| self.tree().locator_for(node)).map_or_else(
                    || {
                        error!(
                            %message,
                            outcome = ?resolution.outcome,
                            "resolver reported a part without a usable located node; \
                             degrading to unavailable"
                        );
                        MainPart::Unavailable
                    },
                    |locator| MainPart::Resolved { locator },
                )
            }
            ResolveOutcome::MessageNotLoaded => {
                // A message must be structurally loaded before it can be
                // selected, so this outcome cannot legitimately reach us.
                debug_assert!(
                    false,
                    "resolver reported an unloaded message for a selected message"
                );
                error!(
                    %message,
                    "resolver reported an unloaded message for a selected message; \
                     degrading to unavailable"
                );
                MainPart::Unavailable
            }
            ResolveOutcome::CannotDetermine => MainPart::Fallback {
                payload: resolution.diagnostic.unwrap_or_default(),
            },
        }
    }

    fn set_main_part(&mut self, main_part: MainPart) {
        debug!(main_part = ?main_part, "main part updated");
        self.main_part = main_part;
        for observer in &mut self.main_part_changed {
            observer(&self.main_part);
        }
    }

    fn emit_attributes_changed(&mut self) {
        for observer in &mut self.attributes_changed {
            observer();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mailfacet_store::{AttrValue, MemoryTree};
    use std::cell::Cell;
    use std::rc::Rc;

    fn found_resolver() -> impl MainPartResolver<MemoryTree> {
        |tree: &MemoryTree, message: NodeHandle| {
            tree.children_of(message)
                .first()
                .map_or_else(|| Resolution::found(message), |part| Resolution::found(*part))
        }
    }

    mod accessor_tests {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn read_through_without_caching() {
            let tree = MemoryTree::new();
            let message = tree.add_child(tree.root()).unwrap();
            tree.set_attribute(message, Role::Subject, AttrValue::Text("First".into()))
                .unwrap();

            let mut facade = MessageFacade::new(&tree, found_resolver());
            facade.select_message(Some(message));
            assert_eq!(facade.subject(), "First");

            // No cached copy: a later mutation is visible without any event
            // having been pumped.
            tree.set_attribute(message, Role::Subject, AttrValue::Text("Second".into()))
                .unwrap();
            assert_eq!(facade.subject(), "Second");
        }

        #[test]
        fn all_accessors_default_when_nothing_is_selected() {
            let tree = MemoryTree::new();
            let facade = MessageFacade::new(&tree, found_resolver());
            assert!(facade.date().is_none());
            assert_eq!(facade.subject(), "");
            assert!(facade.from().is_empty());
            assert!(facade.to().is_empty());
            assert!(facade.cc().is_empty());
            assert!(facade.bcc().is_empty());
            assert!(facade.sender().is_empty());
            assert!(facade.reply_to().is_empty());
            assert!(facade.in_reply_to().is_empty());
            assert!(facade.message_id().is_empty());
            assert!(!facade.is_marked_deleted());
            assert!(!facade.is_marked_read());
            assert!(!facade.is_marked_forwarded());
            assert!(!facade.is_marked_replied());
            assert!(!facade.is_marked_recent());
        }

        #[test]
        fn populated_envelope_reads_back() {
            let tree = MemoryTree::new();
            let message = tree.add_child(tree.root()).unwrap();
            let date = chrono::Utc.with_ymd_and_hms(2026, 1, 15, 19, 31, 43).unwrap();
            tree.set_attribute(message, Role::Date, AttrValue::Date(Some(date)))
                .unwrap();
            tree.set_attribute(
                message,
                Role::From,
                AttrValue::Addresses(vec![Address::parse("John Doe <john@example.com>")]),
            )
            .unwrap();
            tree.set_attribute(message, Role::IsMarkedRead, AttrValue::Bool(true))
                .unwrap();
            tree.set_attribute(
                message,
                Role::MessageId,
                AttrValue::Bytes(b"<id@example.com>".to_vec()),
            )
            .unwrap();

            let mut facade = MessageFacade::new(&tree, found_resolver());
            facade.select_message(Some(message));
            assert_eq!(facade.date(), Some(date));
            assert_eq!(facade.from(), vec![Address::new("John Doe", "john@example.com")]);
            assert!(facade.is_marked_read());
            assert_eq!(facade.message_id(), b"<id@example.com>");
        }
    }

    mod defect_tests {
        use super::*;

        #[cfg(debug_assertions)]
        #[test]
        #[should_panic(expected = "selected node belongs to a different tree")]
        fn foreign_tree_selection_asserts_in_debug() {
            let tree = MemoryTree::new();
            let other = MemoryTree::new();
            let foreign = other.add_child(other.root()).unwrap();
            let mut facade = MessageFacade::new(&tree, found_resolver());
            facade.select_message(Some(foreign));
        }

        #[cfg(debug_assertions)]
        #[test]
        #[should_panic(expected = "resolver reported an unloaded message")]
        fn message_not_loaded_asserts_in_debug() {
            let tree = MemoryTree::new();
            let message = tree.add_child(tree.root()).unwrap();
            let mut facade = MessageFacade::new(
                &tree,
                |_: &MemoryTree, _: NodeHandle| Resolution::message_not_loaded(),
            );
            facade.select_message(Some(message));
        }
    }

    mod notification_tests {
        use super::*;

        #[test]
        fn out_of_scope_events_are_suppressed() {
            let tree = MemoryTree::new();
            let message = tree.add_child(tree.root()).unwrap();
            let other = tree.add_child(tree.root()).unwrap();

            let mut facade = MessageFacade::new(&tree, found_resolver());
            facade.select_message(Some(message));

            let fired = Rc::new(Cell::new(0u32));
            let observer = Rc::clone(&fired);
            facade.on_attributes_changed(move || observer.set(observer.get() + 1));

            let event = tree
                .set_attribute(other, Role::Subject, AttrValue::Text("noise".into()))
                .unwrap();
            facade.handle_tree_event(&event);
            assert_eq!(fired.get(), 0);

            let event = tree
                .set_attribute(message, Role::Subject, AttrValue::Text("signal".into()))
                .unwrap();
            facade.handle_tree_event(&event);
            assert_eq!(fired.get(), 1);
        }
    }
}
