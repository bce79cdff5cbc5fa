//! # mailfacet-model
//!
//! Single-message facade over an observable mail-store tree.
//!
//! A mail client's message pane shows one message at a time, but the data
//! behind it lives in a large shared tree that keeps mutating as the store
//! fetches envelopes and part content in the background. This crate adapts
//! that tree to the pane:
//!
//! - **[`SubtreeProjector`]**: narrows the tree to the portion rooted at the
//!   selected message and classifies tree-wide change events against it, so
//!   consumers only ever hear about their own message.
//! - **Main-part resolution**: consumes an external MIME-part-selection
//!   decision ([`MainPartResolver`]) and converts its four-way outcome into
//!   the always-available [`MainPart`] representation: a part locator, an
//!   inline fallback payload, or nothing.
//! - **[`MessageFacade`]**: the consumer surface with synchronous, crash-free
//!   scalar accessors (date, subject, participants, flags) plus two change
//!   notifications (`attributes_changed`, `main_part_changed`).
//!
//! ## Quick Start
//!
//! ```
//! use mailfacet_model::{MessageFacade, Resolution};
//! use mailfacet_store::{AttrValue, MemoryTree, NodeHandle, Role, SourceTree};
//!
//! let tree = MemoryTree::new();
//! let message = tree.add_child(tree.root()).unwrap();
//! let body = tree.add_child(message).unwrap();
//! tree.set_attribute(message, Role::Subject, AttrValue::Text("Hello".into())).unwrap();
//!
//! // The part-selection policy is external; here it picks the first child.
//! let policy = |tree: &MemoryTree, message: NodeHandle| {
//!     tree.children_of(message)
//!         .first()
//!         .map_or_else(|| Resolution::cannot_determine("no parts"), |p| Resolution::found(*p))
//! };
//!
//! let mut facade = MessageFacade::new(&tree, policy);
//! facade.select_message(Some(message));
//!
//! assert_eq!(facade.subject(), "Hello");
//! let locator = facade.main_part().locator().unwrap();
//! assert_eq!(tree.resolve_locator(locator), Some(body));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod facade;
mod main_part;
mod projector;
mod resolver;

pub use error::{Error, Result};
pub use facade::MessageFacade;
pub use main_part::MainPart;
pub use projector::{SubtreeEvent, SubtreeProjector};
pub use resolver::{MainPartResolver, Resolution, ResolveOutcome};
