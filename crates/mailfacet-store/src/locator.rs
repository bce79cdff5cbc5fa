//! Part locators.

/// Opaque, stable reference to one MIME part within a message.
///
/// A locator is a path-like string minted by the source tree
/// ([`crate::SourceTree::locator_for`]) and resolvable back to the same node
/// ([`crate::SourceTree::resolve_locator`]) for as long as that message's
/// structure survives. Consumers treat the contents as opaque; only the tree
/// that produced a locator interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartLocator(String);

impl PartLocator {
    /// Wraps a tree-produced path string.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the locator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PartLocator {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_from_str() {
        let locator = PartLocator::new("/1/2");
        assert_eq!(locator.as_str(), "/1/2");
    }

    #[test]
    fn display() {
        let locator = PartLocator::new("/0");
        assert_eq!(format!("{locator}"), "/0");
    }

    #[test]
    fn equality() {
        assert_eq!(PartLocator::new("/1"), PartLocator::from("/1"));
        assert_ne!(PartLocator::new("/1"), PartLocator::new("/2"));
    }
}
