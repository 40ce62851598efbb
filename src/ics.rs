//! ICS feed parsing.
//!
//! A hand-rolled RFC 5545 line parser: unfolds continuation lines, splits
//! properties into key/parameters/value, unescapes values, and turns each
//! VEVENT into a [`CalendarEvent`]. Recurrence rules are not expanded;
//! every VEVENT yields exactly one record.

use anyhow::{anyhow, Result};
use calroster_core::harvest::clean_participant;
use calroster_core::{CalendarEvent, EventStatus, EventTime};
use chrono::{NaiveDate, TimeZone, Utc};
use log::warn;

/// Parse every VEVENT in a calendar file into event records.
///
/// Events missing DTSTART, DTEND, or DTSTAMP are skipped with a warning
/// rather than failing the whole feed.
pub fn parse_calendar(content: &str) -> Result<Vec<CalendarEvent>> {
    if !content.contains("BEGIN:VCALENDAR") {
        return Err(anyhow!("not a calendar file (missing BEGIN:VCALENDAR)"));
    }

    let mut events = Vec::new();
    let mut in_vevent = false;
    let mut in_valarm = false;
    let mut current_line = String::new();
    let mut builder = EventBuilder::default();

    for line in content.lines() {
        // Line folding (RFC 5545): continuation lines start with a single
        // space or tab; only that first character is dropped.
        if line.starts_with(' ') || line.starts_with('\t') {
            current_line.push_str(&line[1..]);
            continue;
        }

        // Process the now-complete previous line. Alarm sub-components
        // carry their own ATTENDEE properties, so everything inside
        // VALARM is ignored.
        if !current_line.is_empty() && in_vevent && !in_valarm {
            if let Some((key, params, value)) = parse_property_line(&current_line) {
                builder.apply(&key, &params, &value);
            }
        }

        current_line = line.to_string();

        match line {
            "BEGIN:VEVENT" => {
                in_vevent = true;
                builder = EventBuilder::default();
            }
            "END:VEVENT" => {
                in_vevent = false;
                match builder.finish() {
                    Some(event) => events.push(event),
                    None => warn!("skipping event without a complete date set"),
                }
                builder = EventBuilder::default();
            }
            "BEGIN:VALARM" => in_valarm = true,
            "END:VALARM" => in_valarm = false,
            _ => {}
        }
    }

    Ok(events)
}

/// Accumulates the properties of one VEVENT as lines arrive.
#[derive(Default)]
struct EventBuilder {
    summary: Option<String>,
    description: Option<String>,
    dtstart: Option<EventTime>,
    dtend: Option<EventTime>,
    dtstamp: Option<EventTime>,
    status: Option<EventStatus>,
    organizer: Option<String>,
    attendees: Vec<String>,
}

impl EventBuilder {
    fn apply(&mut self, key: &str, params: &str, value: &str) {
        match key {
            "SUMMARY" => self.summary = Some(value.to_string()),
            "DESCRIPTION" => self.description = Some(value.to_string()),
            "DTSTART" => self.dtstart = parse_datetime(value, params),
            "DTEND" => self.dtend = parse_datetime(value, params),
            "DTSTAMP" => self.dtstamp = parse_datetime(value, params),
            "STATUS" => {
                self.status = Some(match value {
                    "TENTATIVE" => EventStatus::Tentative,
                    "CANCELLED" => EventStatus::Cancelled,
                    _ => EventStatus::Confirmed,
                });
            }
            "ORGANIZER" => self.organizer = Some(value.to_string()),
            "ATTENDEE" => self.attendees.push(value.to_string()),
            _ => {}
        }
    }

    fn finish(self) -> Option<CalendarEvent> {
        let start = self.dtstart?;
        let end = self.dtend?;
        let timestamp = self.dtstamp?;

        Some(CalendarEvent {
            summary: self.summary.unwrap_or_else(|| "(No title)".to_string()),
            start,
            end,
            timestamp,
            description: self.description,
            organizer: self.organizer.as_deref().and_then(clean_participant),
            attendees: self
                .attendees
                .iter()
                .filter_map(|raw| clean_participant(raw))
                .collect(),
            status: self.status.unwrap_or(EventStatus::Confirmed),
        })
    }
}

/// Split a single ICS property line into key, parameters, and value.
fn parse_property_line(line: &str) -> Option<(String, String, String)> {
    let colon_pos = line.find(':')?;
    let key_part = &line[..colon_pos];
    let value = &line[colon_pos + 1..];

    let mut parts = key_part.splitn(2, ';');
    let key = parts.next()?.to_string();
    let params = parts.next().unwrap_or("").to_string();

    Some((key, params, unescape_ics_value(value)))
}

/// Unescape ICS property values per RFC 5545:
/// \, → , and \; → ; and \\ → \ and \n → newline
fn unescape_ics_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(',') => {
                    result.push(',');
                    chars.next();
                }
                Some(';') => {
                    result.push(';');
                    chars.next();
                }
                Some('\\') => {
                    result.push('\\');
                    chars.next();
                }
                Some('n') | Some('N') => {
                    result.push('\n');
                    chars.next();
                }
                _ => result.push(c), // Keep backslash if not a recognized escape
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Parse a DATE or DATE-TIME value from ICS.
fn parse_datetime(value: &str, params: &str) -> Option<EventTime> {
    // Date-only value (VALUE=DATE or bare YYYYMMDD)
    let is_date = params.contains("VALUE=DATE");

    if is_date || (value.len() == 8 && value.chars().all(|c| c.is_ascii_digit())) {
        let y = value.get(0..4)?.parse().ok()?;
        let m = value.get(4..6)?.parse().ok()?;
        let d = value.get(6..8)?.parse().ok()?;
        let date = NaiveDate::from_ymd_opt(y, m, d)?;
        return Some(EventTime::Date(date));
    }

    // DateTime format: YYYYMMDDTHHMMSSZ or YYYYMMDDTHHMMSS
    if value.len() >= 15 && value.contains('T') {
        let y: i32 = value.get(0..4)?.parse().ok()?;
        let mo: u32 = value.get(4..6)?.parse().ok()?;
        let d: u32 = value.get(6..8)?.parse().ok()?;
        let h: u32 = value.get(9..11)?.parse().ok()?;
        let mi: u32 = value.get(11..13)?.parse().ok()?;
        let s: u32 = value.get(13..15)?.parse().ok()?;

        let dt = Utc.with_ymd_and_hms(y, mo, d, h, mi, s).single()?;
        return Some(EventTime::DateTime(dt));
    }

    None
}
