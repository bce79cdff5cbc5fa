//! Error types for the model layer.

use mailfacet_store::Uid;
use thiserror::Error;

/// Errors that can occur in model operations.
///
/// Deliberately small: attribute absence and empty selections are defaults,
/// not errors, and contract violations are defects reported through
/// assertions and logging rather than through this type.
#[derive(Debug, Error)]
pub enum Error {
    /// The identifier pair named a message the store does not know.
    #[error("message not found: uid {uid} in {mailbox}")]
    MessageNotFound {
        /// Mailbox the lookup ran against.
        mailbox: String,
        /// UID that failed to resolve.
        uid: Uid,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
