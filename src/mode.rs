//! Sender field modes
//!
//! The "From" field is either a fixed choice from a list of known
//! mailboxes or free text typed by the user. Only free text is checked.

use std::fmt;

/// The selection mode of the sender address field.
///
/// # Examples
///
/// ```
/// use spoofcheck::FieldMode;
///
/// assert_eq!(FieldMode::from("custom"), FieldMode::Custom);
/// assert!(FieldMode::from("custom").is_custom());
///
/// let fixed = FieldMode::from("alerts@corp.example");
/// assert_eq!(fixed.as_str(), "alerts@corp.example");
/// assert!(!fixed.is_custom());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FieldMode {
    /// A mailbox picked from the fixed-choice selector.
    Mailbox(String),
    /// Free text entered by the user.
    #[default]
    Custom,
}

impl FieldMode {
    /// Create a fixed-choice mode for the given mailbox.
    #[must_use]
    pub fn mailbox(address: impl Into<String>) -> Self {
        Self::Mailbox(address.into())
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }

    /// The selector value for this mode.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mailbox(address) => address,
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FieldMode {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("custom") {
            Self::Custom
        } else {
            Self::Mailbox(s.to_string())
        }
    }
}

impl From<String> for FieldMode {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
