//! The main-part resolution protocol, consumption side.
//!
//! Which MIME part of a message is the "interesting" one to display is a
//! policy decision that lives outside this crate. The facade consumes that
//! decision through [`MainPartResolver`]: a four-way outcome, an optional
//! located node, and an optional diagnostic. The facade maps the outcome
//! onto a [`crate::MainPart`]; it never second-guesses the policy.

use mailfacet_store::{NodeHandle, SourceTree};

/// How a resolution attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// A displayable part was located and its metadata is loaded.
    Found,
    /// A displayable part was located but its content is still being
    /// fetched.
    PartLoading,
    /// The message's own envelope/structure is not available yet. At the
    /// facade's call site this is a contract violation: a message must be
    /// structurally loaded before it can be selected.
    MessageNotLoaded,
    /// No displayable part exists; the diagnostic says why.
    CannotDetermine,
}

/// The full result of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// How the attempt ended.
    pub outcome: ResolveOutcome,
    /// The located part, present for [`ResolveOutcome::Found`] and
    /// [`ResolveOutcome::PartLoading`].
    pub located: Option<NodeHandle>,
    /// Human-readable explanation, present for
    /// [`ResolveOutcome::CannotDetermine`].
    pub diagnostic: Option<String>,
}

impl Resolution {
    /// A loaded part at `located`.
    #[must_use]
    pub const fn found(located: NodeHandle) -> Self {
        Self {
            outcome: ResolveOutcome::Found,
            located: Some(located),
            diagnostic: None,
        }
    }

    /// A still-loading part at `located`.
    #[must_use]
    pub const fn part_loading(located: NodeHandle) -> Self {
        Self {
            outcome: ResolveOutcome::PartLoading,
            located: Some(located),
            diagnostic: None,
        }
    }

    /// The message itself is not loaded.
    #[must_use]
    pub const fn message_not_loaded() -> Self {
        Self {
            outcome: ResolveOutcome::MessageNotLoaded,
            located: None,
            diagnostic: None,
        }
    }

    /// No displayable part exists, for the given reason.
    #[must_use]
    pub fn cannot_determine(diagnostic: impl Into<String>) -> Self {
        Self {
            outcome: ResolveOutcome::CannotDetermine,
            located: None,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// The external MIME-part-selection policy.
///
/// Implementations inspect the message's already-materialized structure and
/// decide which part to display. They must be synchronous and must not
/// trigger fetching; "still loading" is reported through
/// [`ResolveOutcome::PartLoading`], never by blocking.
pub trait MainPartResolver<T: SourceTree> {
    /// Decides the main displayable part of `message`.
    fn resolve_main_part(&mut self, tree: &T, message: NodeHandle) -> Resolution;
}

/// Closures are resolvers, which keeps simple policies and test doubles
/// free of boilerplate.
impl<T, F> MainPartResolver<T> for F
where
    T: SourceTree,
    F: FnMut(&T, NodeHandle) -> Resolution,
{
    fn resolve_main_part(&mut self, tree: &T, message: NodeHandle) -> Resolution {
        self(tree, message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mailfacet_store::MemoryTree;

    #[test]
    fn constructors_enforce_shape() {
        let tree = MemoryTree::new();
        let node = tree.add_child(tree.root()).unwrap();

        let found = Resolution::found(node);
        assert_eq!(found.outcome, ResolveOutcome::Found);
        assert_eq!(found.located, Some(node));
        assert!(found.diagnostic.is_none());

        let not_loaded = Resolution::message_not_loaded();
        assert!(not_loaded.located.is_none());

        let cannot = Resolution::cannot_determine("no readable part");
        assert_eq!(cannot.diagnostic.as_deref(), Some("no readable part"));
        assert!(cannot.located.is_none());
    }

    #[test]
    fn closures_implement_the_trait() {
        let tree = MemoryTree::new();
        let node = tree.add_child(tree.root()).unwrap();
        let mut calls = 0;
        let mut resolver = |_: &MemoryTree, message: NodeHandle| {
            calls += 1;
            Resolution::found(message)
        };
        let resolution = resolver.resolve_main_part(&tree, node);
        assert_eq!(resolution.located, Some(node));
        assert_eq!(calls, 1);
    }
}
