//! Core types for calroster.
//!
//! This crate holds the contact identity-resolution engine and the types
//! shared between the ingestion CLI and the persistence layer:
//! - `Contact` records with the equivalence and merge rules
//! - `ContactDirectory`, the deduplicated working set
//! - `CalendarEvent` records produced by the feed-parsing layer
//! - event→contact harvesting
//! - the CSV snapshot format for the directory
//!
//! Everything here is synchronous and single-threaded; the only I/O is
//! snapshot load/save.

pub mod contact;
pub mod directory;
pub mod error;
pub mod event;
pub mod harvest;
pub mod snapshot;

// Re-export the main types at crate root for convenience
pub use contact::Contact;
pub use directory::{ContactDirectory, MatchPolicy};
pub use error::{RosterError, RosterResult};
pub use event::{CalendarEvent, EventStatus, EventTime};
