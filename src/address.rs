//! Sender address parsing
//!
//! The checker only cares about the domain of whatever the user typed
//! into the address field. Text is split on the first `@`; everything
//! after it is the domain, verbatim.

/// Extract the domain part of free-form address text.
///
/// Returns `None` for empty text, text without an `@`, or text whose
/// domain part is empty. Only the first `@` is a split boundary, so
/// further `@` characters stay in the domain.
///
/// # Examples
///
/// ```
/// use spoofcheck::domain_of;
///
/// assert_eq!(domain_of("user@example.com"), Some("example.com"));
/// assert_eq!(domain_of("a@b@c.org"), Some("b@c.org"));
/// assert_eq!(domain_of("no-at-sign"), None);
/// assert_eq!(domain_of("user@"), None);
/// ```
#[must_use]
pub fn domain_of(text: &str) -> Option<&str> {
    text.split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}

/// Suggest a spoof domain from the envelope address.
///
/// When the envelope address changes and the spoof-domain field is
/// still empty, the envelope's domain is a sensible default. Returns
/// `None` when the field already has a value or the envelope has no
/// usable domain.
#[must_use]
pub fn suggest_spoof_domain(envelope: &str, current_spoof_domain: &str) -> Option<String> {
    if !current_spoof_domain.is_empty() {
        return None;
    }
    domain_of(envelope).map(ToString::to_string)
}
