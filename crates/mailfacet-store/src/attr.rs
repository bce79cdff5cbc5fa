//! Attribute roles and typed values.
//!
//! Every envelope field and flag a message node exposes is addressed by a
//! [`Role`]. Reads are total: a role always has a value of its documented
//! kind, falling back to the role's default when the node is stale or the
//! store has not (yet) materialized the data. Consumers therefore never see
//! an error for absence, only the default.

use chrono::{DateTime, Utc};

use crate::Address;

/// Enumerated attribute identifier for message nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Message date. Date-kind; defaults to no date.
    Date,
    /// Subject line. Text-kind; defaults to empty.
    Subject,
    /// `From` participants. Address-list-kind; defaults to empty.
    From,
    /// `To` participants. Address-list-kind; defaults to empty.
    To,
    /// `Cc` participants. Address-list-kind; defaults to empty.
    Cc,
    /// `Bcc` participants. Address-list-kind; defaults to empty.
    Bcc,
    /// `Sender` participants. Address-list-kind; defaults to empty.
    Sender,
    /// `Reply-To` participants. Address-list-kind; defaults to empty.
    ReplyTo,
    /// Raw `In-Reply-To` header value. Bytes-kind; defaults to empty.
    InReplyTo,
    /// Raw `Message-Id` header value. Bytes-kind; defaults to empty.
    MessageId,
    /// Whether the message is marked for deletion. Bool-kind; defaults to `false`.
    IsMarkedDeleted,
    /// Whether the message has been read. Bool-kind; defaults to `false`.
    IsMarkedRead,
    /// Whether the message has been forwarded. Bool-kind; defaults to `false`.
    IsMarkedForwarded,
    /// Whether the message has been replied to. Bool-kind; defaults to `false`.
    IsMarkedReplied,
    /// Whether the message is recent. Bool-kind; defaults to `false`.
    IsMarkedRecent,
}

impl Role {
    /// The default value for this role.
    ///
    /// This is the single source of the "always total, never absent"
    /// contract: stale handles and unmaterialized attributes read as this
    /// value.
    #[must_use]
    pub fn default_value(self) -> AttrValue {
        match self {
            Self::Date => AttrValue::Date(None),
            Self::Subject => AttrValue::Text(String::new()),
            Self::From | Self::To | Self::Cc | Self::Bcc | Self::Sender | Self::ReplyTo => {
                AttrValue::Addresses(Vec::new())
            }
            Self::InReplyTo | Self::MessageId => AttrValue::Bytes(Vec::new()),
            Self::IsMarkedDeleted
            | Self::IsMarkedRead
            | Self::IsMarkedForwarded
            | Self::IsMarkedReplied
            | Self::IsMarkedRecent => AttrValue::Bool(false),
        }
    }

    /// Returns true if `value` is of the kind this role carries.
    #[must_use]
    pub const fn accepts(self, value: &AttrValue) -> bool {
        matches!(
            (self, value),
            (Self::Date, AttrValue::Date(_))
                | (Self::Subject, AttrValue::Text(_))
                | (
                    Self::From
                        | Self::To
                        | Self::Cc
                        | Self::Bcc
                        | Self::Sender
                        | Self::ReplyTo,
                    AttrValue::Addresses(_),
                )
                | (Self::InReplyTo | Self::MessageId, AttrValue::Bytes(_))
                | (
                    Self::IsMarkedDeleted
                        | Self::IsMarkedRead
                        | Self::IsMarkedForwarded
                        | Self::IsMarkedReplied
                        | Self::IsMarkedRecent,
                    AttrValue::Bool(_),
                )
        )
    }
}

/// A typed attribute value.
///
/// The extraction helpers are total: asking a value for a kind it does not
/// carry yields that kind's default rather than an error, mirroring
/// [`Role::default_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A point in time; `None` is the null date.
    Date(Option<DateTime<Utc>>),
    /// Free-form text.
    Text(String),
    /// A participant list.
    Addresses(Vec<Address>),
    /// A boolean flag.
    Bool(bool),
    /// Raw header bytes.
    Bytes(Vec<u8>),
}

impl AttrValue {
    /// Extracts the date, or `None` for any other kind.
    #[must_use]
    pub fn into_date(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(date) => date,
            _ => None,
        }
    }

    /// Extracts the text, or an empty string for any other kind.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            _ => String::new(),
        }
    }

    /// Extracts the participant list, or an empty list for any other kind.
    #[must_use]
    pub fn into_addresses(self) -> Vec<Address> {
        match self {
            Self::Addresses(addresses) => addresses,
            _ => Vec::new(),
        }
    }

    /// Extracts the flag, or `false` for any other kind.
    #[must_use]
    pub const fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            _ => false,
        }
    }

    /// Extracts the raw bytes, or an empty buffer for any other kind.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Bytes(bytes) => bytes,
            _ => Vec::new(),
        }
    }
}
