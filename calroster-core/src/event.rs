//! Calendar event records produced by the feed-parsing layer.
//!
//! The parser hands these to the harvesting step, which only cares about
//! status and participants; the remaining fields feed the event report.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single occurrence pulled from a calendar feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    /// When the feed last stamped this event (DTSTAMP).
    pub timestamp: EventTime,
    pub description: Option<String>,
    /// Cleaned organizer identifier, usually a bare email address. `None`
    /// when the feed had no organizer or it was an auto-generated
    /// calendar-system address.
    pub organizer: Option<String>,
    /// Cleaned attendee identifiers, auto-generated addresses removed.
    pub attendees: Vec<String>,
    pub status: EventStatus,
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.summary, self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%:z")),
            EventTime::Date(d) => write!(f, "{}", d),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}
