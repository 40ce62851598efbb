//! Error types for the calroster core.

use thiserror::Error;

/// Errors that can occur while building or updating a contact roster.
#[derive(Error, Debug)]
pub enum RosterError {
    /// A contact was constructed with no identifying fields at all.
    #[error("contact has no identifying fields (name and emails all empty)")]
    InvalidRecord,

    /// An incoming record's email addresses span two existing directory
    /// entries. Merging those entries automatically could conflate
    /// unrelated people, so the caller has to resolve it.
    #[error("email addresses map to more than one existing contact: {0}")]
    ConflictingIdentity(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;
