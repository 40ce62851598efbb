//! Turning calendar events into contact directory entries.

use crate::contact::Contact;
use crate::directory::ContactDirectory;
use crate::error::RosterResult;
use crate::event::{CalendarEvent, EventStatus};

/// Domain calendar systems use for auto-generated resource addresses.
/// Participants under it are not people, so they are dropped.
const AUTO_GENERATED_DOMAIN: &str = "calendar.google.com";

/// Clean a raw ORGANIZER/ATTENDEE value into a usable person identifier.
///
/// `mailto:` URIs are unwrapped to the bare address; auto-generated
/// calendar-system addresses yield `None`. Values without the mailto
/// scheme pass through unchanged.
pub fn clean_participant(raw: &str) -> Option<String> {
    if let Some(email) = raw.strip_prefix("mailto:") {
        if email.ends_with(AUTO_GENERATED_DOMAIN) {
            return None;
        }
        return Some(email.to_string());
    }
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Feed one event's participants into the directory.
///
/// Only CONFIRMED events contribute; anything else returns immediately.
/// Each attendee and the organizer become an email-only [`Contact`] and
/// are inserted in order. Returns the number of records inserted,
/// merges included.
pub fn harvest_event(
    event: &CalendarEvent,
    directory: &mut ContactDirectory,
) -> RosterResult<usize> {
    if event.status != EventStatus::Confirmed {
        return Ok(0);
    }

    let mut inserted = 0;
    for attendee in &event.attendees {
        directory.add(Contact::from_email(attendee)?)?;
        inserted += 1;
    }
    if let Some(organizer) = &event.organizer {
        directory.add(Contact::from_email(organizer)?)?;
        inserted += 1;
    }
    Ok(inserted)
}
