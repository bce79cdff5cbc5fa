//! # mailfacet-store
//!
//! Source-tree vocabulary for the mailfacet message model.
//!
//! A mail store materializes each account as one big tree: mailboxes contain
//! messages, messages contain MIME parts, and parts arrive asynchronously as
//! the store fetches them. This crate defines the narrow boundary through
//! which the model layer consumes such a tree:
//!
//! - **Node handles**: [`NodeHandle`] is an opaque `Copy` reference into one
//!   tree instance; validity is asked of the tree, never assumed.
//! - **Typed attributes**: [`Role`] enumerates the envelope fields and flags
//!   a message node can carry, [`AttrValue`] is the typed value union, and
//!   every role has a documented default so attribute reads are total.
//! - **Change events**: [`TreeEvent`] is the notification vocabulary a tree
//!   emits as content arrives or mutates.
//! - **Part locators**: [`PartLocator`] is an opaque, stable, round-trippable
//!   reference to one MIME part inside a message.
//! - **The [`SourceTree`] trait**: the full consumed surface, with
//!   [`MemoryTree`] as the in-memory reference implementation used by tests.
//!
//! ## Quick Start
//!
//! ```
//! use mailfacet_store::{AttrValue, MemoryTree, Role, SourceTree};
//!
//! let tree = MemoryTree::new();
//! let message = tree.add_child(tree.root()).unwrap();
//! tree.set_attribute(message, Role::Subject, AttrValue::Text("Hello".into())).unwrap();
//!
//! assert_eq!(
//!     tree.attribute_of(message, Role::Subject).into_text(),
//!     "Hello",
//! );
//! // Absent attributes read as their documented default, never an error.
//! assert!(tree.attribute_of(message, Role::From).into_addresses().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod attr;
mod event;
mod locator;
mod memory;
mod node;
mod tree;

pub use address::Address;
pub use attr::{AttrValue, Role};
pub use event::TreeEvent;
pub use locator::PartLocator;
pub use memory::MemoryTree;
pub use node::{NodeHandle, NodeId, TreeId, Uid};
pub use tree::SourceTree;
