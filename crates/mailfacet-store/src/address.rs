//! Message participants.

/// A mailbox participant: display name plus address.
///
/// Envelope fields like `From` and `To` carry lists of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Display name. Falls back to the address itself when the source gave
    /// only a bare address.
    pub name: String,
    /// The address proper, without angle brackets.
    pub email: String,
}

impl Address {
    /// Creates an address from explicit parts.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Parses a participant from a header-style string.
    ///
    /// Accepts the `Name <email@example.com>` form and the bare-address
    /// form. An empty name falls back to the address for both halves, so a
    /// display layer always has something to show.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        // Try to parse "Name <email@example.com>" format
        if let Some(start) = raw.rfind('<')
            && let Some(end) = raw.rfind('>')
            && start < end
        {
            let email = raw[start + 1..end].to_string();
            let name = raw[..start].trim().trim_matches('"').to_string();
            if name.is_empty() {
                return Self::new(email.clone(), email);
            }
            return Self::new(name, email);
        }
        // Just an email address
        let raw = raw.trim();
        Self::new(raw, raw)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name == self.email {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn name_and_email() {
            let addr = Address::parse("John Doe <john@example.com>");
            assert_eq!(addr.name, "John Doe");
            assert_eq!(addr.email, "john@example.com");
        }

        #[test]
        fn quoted_name() {
            let addr = Address::parse("\"Doe, John\" <john@example.com>");
            assert_eq!(addr.name, "Doe, John");
            assert_eq!(addr.email, "john@example.com");
        }

        #[test]
        fn bare_email() {
            let addr = Address::parse("jane@example.com");
            assert_eq!(addr.name, "jane@example.com");
            assert_eq!(addr.email, "jane@example.com");
        }

        #[test]
        fn empty_name_falls_back_to_email() {
            let addr = Address::parse("<bob@example.com>");
            assert_eq!(addr.name, "bob@example.com");
            assert_eq!(addr.email, "bob@example.com");
        }

        #[test]
        fn surrounding_whitespace() {
            let addr = Address::parse("  carol@example.com  ");
            assert_eq!(addr.email, "carol@example.com");
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn with_name() {
            let addr = Address::new("John Doe", "john@example.com");
            assert_eq!(format!("{addr}"), "John Doe <john@example.com>");
        }

        #[test]
        fn bare_when_name_equals_email() {
            let addr = Address::new("jane@example.com", "jane@example.com");
            assert_eq!(format!("{addr}"), "jane@example.com");
        }

        #[test]
        fn round_trips_through_parse() {
            let addr = Address::new("John Doe", "john@example.com");
            assert_eq!(Address::parse(&format!("{addr}")), addr);
        }
    }
}
