//! Event summary report written at the end of a run.

use anyhow::{Context, Result};
use calroster_core::CalendarEvent;
use std::path::Path;

/// Write one CSV row per event: summary, times, description, and the
/// participants (attendees joined into a single cell).
pub fn write_event_report(events: &[CalendarEvent], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create event report at {}", path.display()))?;

    writer.write_record([
        "summary",
        "start",
        "end",
        "timestamp",
        "description",
        "organizer",
        "attendees",
    ])?;

    for event in events {
        writer.write_record(&[
            event.summary.clone(),
            event.start.to_string(),
            event.end.to_string(),
            event.timestamp.to_string(),
            event.description.clone().unwrap_or_default(),
            event.organizer.clone().unwrap_or_default(),
            event.attendees.join(","),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calroster_core::{EventStatus, EventTime};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    #[test]
    fn test_report_rows_match_events() {
        let events = vec![CalendarEvent {
            summary: "Planning".to_string(),
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2023, 1, 5, 10, 0, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(2023, 1, 5, 11, 0, 0).unwrap()),
            timestamp: EventTime::DateTime(Utc.with_ymd_and_hms(2023, 1, 4, 9, 0, 0).unwrap()),
            description: None,
            organizer: Some("kevin.goldsmith@x.com".to_string()),
            attendees: vec![
                "fred.flintstone@aol.com".to_string(),
                "barney.rubble@foobar.org".to_string(),
            ],
            status: EventStatus::Confirmed,
        }];

        let dir = tempdir().unwrap();
        let path = dir.path().join("events.csv");
        write_event_report(&events, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec![
                "summary",
                "start",
                "end",
                "timestamp",
                "description",
                "organizer",
                "attendees",
            ])
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Planning");
        assert_eq!(
            &rows[0][6],
            "fred.flintstone@aol.com,barney.rubble@foobar.org"
        );
    }
}
