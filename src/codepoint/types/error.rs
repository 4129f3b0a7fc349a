//! Custom error types for the codepoint-reader crate.

use thiserror::Error;

use crate::codepoint::format::metadata::LineMode;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum CodePointError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A required entry does not exist in the archive or directory.
    #[error("Entry not found: {name}")]
    NotFound { name: String },

    /// The archive could not be opened or one of its entries could not be read.
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    /// A codelist resource could not be opened or read as a spreadsheet.
    #[error("Malformed spreadsheet {name}: {message}")]
    MalformedSpreadsheet { name: String, message: String },

    /// The column header entry does not hold exactly two rows.
    #[error("Malformed column headers: expected 2 rows, found {rows}")]
    MalformedHeaders { rows: usize },

    /// The metadata text does not follow the banner/header/area-count grammar.
    #[error("Invalid metadata format: {reason} (state: {state}, line: {line:?})")]
    InvalidFormat {
        reason: String,
        state: LineMode,
        line: String,
    },

    /// A caller-supplied postcode area is not 1 or 2 letters.
    #[error("Incorrect format for area: expected 1 or 2 letters, got {0:?}")]
    InvalidArea(String),

    /// The tabular-text parser rejected an entry.
    #[error("Invalid CSV in {name}: {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },

    /// A record lacks a column required for coordinate conversion.
    #[error("Record has no {0} field")]
    MissingField(String),

    /// An Eastings/Northings value is not a number.
    #[error("Invalid {field} value: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    /// The coordinate projection library rejected a definition or a point.
    #[error("Projection failed: {0}")]
    Projection(String),

    /// A mutex lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A mutex lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

impl CodePointError {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub(crate) fn spreadsheet(name: impl Into<String>, message: impl ToString) -> Self {
        Self::MalformedSpreadsheet {
            name: name.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn csv(name: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            name: name.into(),
            source,
        }
    }
}

/// A convenience `Result` type alias using the crate's `CodePointError` type.
pub type Result<T> = std::result::Result<T, CodePointError>;
