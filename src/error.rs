use thiserror::Error;

use crate::entry::RawEntry;

/// Everything that can go wrong while turning raw entries into a reading list.
///
/// None of these are recoverable: a single bad entry aborts the whole run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required field `{field}` in entry: {entry}")]
    MissingField {
        field: &'static str,
        entry: Box<RawEntry>,
    },

    #[error("invalid year `{value}` in entry: {entry}")]
    InvalidYear { value: String, entry: Box<RawEntry> },

    #[error("unknown booktitle: {0}. Please add it to the booktitle pattern table")]
    UnknownBooktitle(String),

    #[error("invalid booktitle pattern for series `{0}`: no alternatives")]
    InvalidPattern(&'static str),

    #[error("journal entries are not supported yet (entry `{0}`)")]
    NotImplemented(String),

    #[error("unknown archive prefix: {0}")]
    UnknownArchivePrefix(String),

    #[error("unknown entry type: {0}")]
    UnknownEntryType(Box<RawEntry>),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
