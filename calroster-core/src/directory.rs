//! The deduplicated contact collection.

use crate::contact::Contact;
use crate::error::{RosterError, RosterResult};
use std::fmt;

/// How aggressively [`ContactDirectory::add`] folds same-named records
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// A matching, fully specified name pair is enough to merge, even when
    /// both records carry emails and none are shared. Two people sharing a
    /// full name will be conflated; the trade favors fewer duplicates.
    #[default]
    NameSuffices,
    /// Same-named records whose email sets are both non-empty and disjoint
    /// stay separate.
    RequireSharedEmail,
}

/// The deduplicated working set of contacts for one run.
///
/// Invariant: no email address appears in more than one entry. `add` is
/// the only mutation path and either completes fully or, on conflict,
/// leaves the directory untouched.
#[derive(Debug, Default)]
pub struct ContactDirectory {
    entries: Vec<Contact>,
    policy: MatchPolicy,
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MatchPolicy) -> Self {
        ContactDirectory {
            entries: Vec::new(),
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Contact] {
        &self.entries
    }

    /// Insert a contact, merging it into an existing entry when it matches
    /// one.
    ///
    /// Precedence: an entry already owning one of the new record's
    /// addresses absorbs it; failing that, the first entry equivalent
    /// under [`Contact::equivalent`] (subject to the match policy) absorbs
    /// it; otherwise the record is appended as a new entry.
    ///
    /// Fails with [`RosterError::ConflictingIdentity`] when the new
    /// record's addresses are owned by two distinct existing entries —
    /// merging those would need operator judgment. Nothing is mutated on
    /// failure.
    pub fn add(&mut self, new_contact: Contact) -> RosterResult<()> {
        let mut owner: Option<usize> = None;
        for email in &new_contact.emails {
            if let Some(index) = self.index_by_email(email) {
                match owner {
                    None => owner = Some(index),
                    Some(existing) if existing != index => {
                        return Err(RosterError::ConflictingIdentity(
                            new_contact.emails.join(", "),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        if let Some(index) = owner {
            self.entries[index].merge(&new_contact);
            return Ok(());
        }

        if let Some(index) = self.find_equivalent(&new_contact) {
            self.entries[index].merge(&new_contact);
            return Ok(());
        }

        self.entries.push(new_contact);
        Ok(())
    }

    /// Find the entry owning an email address, if any. Addresses are
    /// unique across entries, so the first hit is the only one.
    pub fn find_by_email(&self, email: &str) -> Option<&Contact> {
        self.index_by_email(email).map(|index| &self.entries[index])
    }

    /// Append an entry without any matching, trusting the caller that it
    /// doesn't overlap existing entries. Used when restoring a snapshot
    /// that already satisfies the directory invariant.
    pub(crate) fn restore(&mut self, contact: Contact) {
        self.entries.push(contact);
    }

    fn index_by_email(&self, email: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.emails.iter().any(|e| e == email))
    }

    fn find_equivalent(&self, candidate: &Contact) -> Option<usize> {
        self.entries.iter().position(|entry| {
            entry.equivalent(candidate)
                && (self.policy == MatchPolicy::NameSuffices
                    || entry.emails.is_empty()
                    || candidate.emails.is_empty()
                    || entry.shares_email(candidate))
        })
    }
}

impl fmt::Display for ContactDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contact directory: {} entries", self.entries.len())
    }
}
