//! The main-part representation.

use mailfacet_store::PartLocator;

/// The facade's answer to "what should the message view display?".
///
/// Exactly one variant is active at any time and consumers never observe an
/// uninitialized state: a facade starts at [`MainPart::Unavailable`] and
/// every selection passes through it before settling on the resolved
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MainPart {
    /// A loaded (or still-loading) part, addressed by its stable locator.
    Resolved {
        /// Locator of the part to display, resolvable by the source tree.
        locator: PartLocator,
    },
    /// Inline text to display in place of a part, with a human-readable
    /// explanation of why no displayable part exists.
    Fallback {
        /// The text to show.
        payload: String,
    },
    /// Nothing to display: no selection, a selection being recomputed, or
    /// the degraded output of a defect.
    #[default]
    Unavailable,
}

impl MainPart {
    /// The locator, if this is a resolved part.
    #[must_use]
    pub const fn locator(&self) -> Option<&PartLocator> {
        match self {
            Self::Resolved { locator } => Some(locator),
            _ => None,
        }
    }

    /// The fallback payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Fallback { payload } => Some(payload),
            _ => None,
        }
    }

    /// Returns true if there is nothing to display.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unavailable() {
        assert!(MainPart::default().is_unavailable());
    }

    #[test]
    fn locator_only_on_resolved() {
        let part = MainPart::Resolved {
            locator: PartLocator::new("/1/2"),
        };
        assert_eq!(part.locator().map(PartLocator::as_str), Some("/1/2"));
        assert!(part.payload().is_none());
        assert!(!part.is_unavailable());
    }

    #[test]
    fn payload_only_on_fallback() {
        let part = MainPart::Fallback {
            payload: "no readable part".into(),
        };
        assert_eq!(part.payload(), Some("no readable part"));
        assert!(part.locator().is_none());
    }
}
