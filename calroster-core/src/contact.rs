//! Contact records and the identity rules that govern them.

use crate::error::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single person referenced by calendar events.
///
/// A contact may be only partially specified: name-only, email-only, or
/// both. Email-only contacts get a name inferred from the address local
/// part. Callers never mutate fields directly; all changes go through
/// [`Contact::merge`] inside the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    /// Every address this person has been seen under. Order carries no
    /// meaning; duplicates are removed at merge time.
    pub emails: Vec<String>,
}

impl Contact {
    /// Create a contact from name parts and any number of email addresses.
    ///
    /// Fails with [`RosterError::InvalidRecord`] when every field is empty.
    /// When both name parts are empty and at least one address is present,
    /// the name is derived from the first address: the local part is split
    /// on its first `.` into first and last name, or becomes the first
    /// name alone when it has no dot.
    pub fn new(first_name: &str, last_name: &str, emails: Vec<String>) -> RosterResult<Self> {
        if first_name.is_empty() && last_name.is_empty() && emails.is_empty() {
            return Err(RosterError::InvalidRecord);
        }
        let (first_name, last_name) = if first_name.is_empty() && last_name.is_empty() {
            derive_name(&emails[0])
        } else {
            (first_name.to_string(), last_name.to_string())
        };
        Ok(Contact {
            first_name,
            last_name,
            emails,
        })
    }

    /// Create a contact from name parts alone.
    pub fn named(first_name: &str, last_name: &str) -> RosterResult<Self> {
        Self::new(first_name, last_name, Vec::new())
    }

    /// Convenience constructor for the common one-address case.
    pub fn with_email(first_name: &str, last_name: &str, email: &str) -> RosterResult<Self> {
        Self::new(first_name, last_name, vec![email.to_string()])
    }

    /// Create a contact known only by an email address.
    pub fn from_email(email: &str) -> RosterResult<Self> {
        Self::new("", "", vec![email.to_string()])
    }

    /// Whether two records denote the same person.
    ///
    /// Names must match exactly (case-sensitive). A shared email address
    /// is sufficient corroboration; failing that, a fully specified name
    /// pair on both sides is accepted on its own. Partial records never
    /// match on name alone, since an empty part would match anything.
    ///
    /// Reflexive and symmetric, but not transitive: a name-only record can
    /// match two records that don't match each other.
    pub fn equivalent(&self, other: &Contact) -> bool {
        if self.first_name != other.first_name || self.last_name != other.last_name {
            return false;
        }
        if self.shares_email(other) {
            return true;
        }
        !self.first_name.is_empty() && !self.last_name.is_empty()
    }

    /// Whether the two records have at least one email address in common.
    pub fn shares_email(&self, other: &Contact) -> bool {
        self.emails.iter().any(|email| other.emails.contains(email))
    }

    /// Absorb another record for the same person.
    ///
    /// Empty name parts are filled in from `other`; the email sets are
    /// unioned with each address kept exactly once. Populated fields are
    /// never cleared or overwritten, so merging the same record twice is
    /// a no-op the second time. `other` is left unmodified.
    pub fn merge(&mut self, other: &Contact) {
        if self.first_name.is_empty() && !other.first_name.is_empty() {
            self.first_name = other.first_name.clone();
        }
        if self.last_name.is_empty() && !other.last_name.is_empty() {
            self.last_name = other.last_name.clone();
        }
        for email in &other.emails {
            if !self.emails.contains(email) {
                self.emails.push(email.clone());
            }
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.first_name,
            self.last_name,
            self.emails.join(", ")
        )
    }
}

/// Derive (first_name, last_name) from an email address local part.
fn derive_name(email: &str) -> (String, String) {
    let local = email.split_once('@').map_or(email, |(local, _)| local);
    match local.split_once('.') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (local.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_empty_is_invalid() {
        let result = Contact::new("", "", Vec::new());
        assert!(matches!(result, Err(RosterError::InvalidRecord)));
    }

    #[test]
    fn test_first_name_only() {
        let contact = Contact::named("kevin", "").unwrap();
        assert_eq!(contact.first_name, "kevin");
        assert!(contact.last_name.is_empty());
        assert!(contact.emails.is_empty());
    }

    #[test]
    fn test_last_name_only() {
        let contact = Contact::named("", "goldsmith").unwrap();
        assert!(contact.first_name.is_empty());
        assert_eq!(contact.last_name, "goldsmith");
        assert!(contact.emails.is_empty());
    }

    #[test]
    fn test_name_derived_from_email() {
        let contact = Contact::from_email("kevin@devnull.com").unwrap();
        assert_eq!(contact.first_name, "kevin");
        assert!(contact.last_name.is_empty());
        assert_eq!(contact.emails, vec!["kevin@devnull.com"]);

        let contact = Contact::from_email("kevin.goldsmith@devnull.com").unwrap();
        assert_eq!(contact.first_name, "kevin");
        assert_eq!(contact.last_name, "goldsmith");
        assert_eq!(contact.emails, vec!["kevin.goldsmith@devnull.com"]);
    }

    #[test]
    fn test_explicit_name_wins_over_derivation() {
        let contact = Contact::with_email("kevin", "goldsmith", "foo@devnull.com").unwrap();
        assert_eq!(contact.first_name, "kevin");
        assert_eq!(contact.last_name, "goldsmith");
        assert_eq!(contact.emails, vec!["foo@devnull.com"]);
    }

    #[test]
    fn test_partial_name_is_not_derived() {
        // Derivation only kicks in when both name parts are empty.
        let contact = Contact::with_email("kevin", "", "a.b@devnull.com").unwrap();
        assert_eq!(contact.first_name, "kevin");
        assert!(contact.last_name.is_empty());
    }

    #[test]
    fn test_equivalent_on_shared_email() {
        let a = Contact::from_email("ops.team@devnull.com").unwrap();
        let b = Contact::with_email("ops", "team", "ops.team@devnull.com").unwrap();
        assert!(a.equivalent(&b));
        assert!(b.equivalent(&a));
    }

    #[test]
    fn test_equivalent_on_full_name_without_shared_email() {
        let a = Contact::named("kevin", "goldsmith").unwrap();
        let b = Contact::with_email("kevin", "goldsmith", "foo@devnull.com").unwrap();
        assert!(a.equivalent(&b));
        assert!(b.equivalent(&a));
    }

    #[test]
    fn test_partial_name_does_not_match_on_name_alone() {
        let a = Contact::named("kevin", "goldsmith").unwrap();
        let b = Contact::named("kevin", "").unwrap();
        assert!(!a.equivalent(&b));
        assert!(!b.equivalent(&a));

        // Matching partial names with no shared email are still distinct.
        let c = Contact::with_email("kevin", "", "x@devnull.com").unwrap();
        let d = Contact::with_email("kevin", "", "y@devnull.com").unwrap();
        assert!(!c.equivalent(&d));
    }

    #[test]
    fn test_equivalent_is_reflexive() {
        let a = Contact::with_email("kevin", "goldsmith", "foo@devnull.com").unwrap();
        assert!(a.equivalent(&a));
        let b = Contact::from_email("nodot@devnull.com").unwrap();
        assert!(b.equivalent(&b));
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let a = Contact::named("kevin", "goldsmith").unwrap();
        let b = Contact::named("Kevin", "Goldsmith").unwrap();
        assert!(!a.equivalent(&b));
    }

    #[test]
    fn test_merge_fills_empty_names() {
        let mut primary = Contact::with_email("", "goldsmith", "kg@devnull.com").unwrap();
        assert!(primary.first_name.is_empty());

        let incoming = Contact::with_email("kevin", "goldsmith", "kg@devnull.com").unwrap();
        primary.merge(&incoming);
        assert_eq!(primary.first_name, "kevin");
        assert_eq!(primary.last_name, "goldsmith");
    }

    #[test]
    fn test_merge_never_overwrites_populated_names() {
        let mut primary = Contact::with_email("kevin", "goldsmith", "a@devnull.com").unwrap();
        let incoming = Contact::with_email("kevin", "smith", "b@devnull.com").unwrap();
        primary.merge(&incoming);
        assert_eq!(primary.first_name, "kevin");
        assert_eq!(primary.last_name, "goldsmith");
    }

    #[test]
    fn test_merge_unions_emails_exactly_once() {
        let mut primary = Contact::with_email("kevin", "goldsmith", "a@devnull.com").unwrap();
        let incoming = Contact::new(
            "kevin",
            "goldsmith",
            vec!["a@devnull.com".to_string(), "b@devnull.com".to_string()],
        )
        .unwrap();

        primary.merge(&incoming);
        assert_eq!(primary.emails.len(), 2);
        assert!(primary.emails.contains(&"a@devnull.com".to_string()));
        assert!(primary.emails.contains(&"b@devnull.com".to_string()));

        // Merging the same record again changes nothing.
        primary.merge(&incoming);
        assert_eq!(primary.emails.len(), 2);
    }

    #[test]
    fn test_display() {
        let contact = Contact::with_email("kevin", "goldsmith", "foo@devnull.com").unwrap();
        assert_eq!(contact.to_string(), "kevin goldsmith (foo@devnull.com)");
    }
}
