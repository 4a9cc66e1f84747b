//! Error types for the cursor adapter
//!
//! Logical "not found" results for the non-throwing column lookup are plain
//! `None` values and never appear here. Everything in this module is a
//! failure the caller has to handle or propagate.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cursor and backend operations
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    // =========================================================================
    // Column Catalog Errors
    // =========================================================================
    /// Column name absent from the result set
    #[error("column '{name}' does not exist")]
    ColumnNotFound { name: String },

    /// Column index past the end of the result set
    #[error("column index {index} out of range (column count {count})")]
    ColumnIndexOutOfRange { index: usize, count: usize },

    // =========================================================================
    // Cursor State Errors
    // =========================================================================
    /// Cursor is closed
    #[error("cursor is closed")]
    CursorClosed,

    /// Read attempted while the cursor is not positioned on a row
    #[error("no current row (position {position})")]
    NoCurrentRow { position: i64 },

    // =========================================================================
    // Data Errors
    // =========================================================================
    /// Row width does not match the column count
    #[error("row {row} has {actual} values but the result has {expected} columns")]
    RowShape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Data conversion error
    #[error("data conversion error: {0}")]
    DataConversion(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid connection string
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// Failure reported by the underlying SQL engine
    #[error("backend error: {0}")]
    Backend(#[from] rusqlite::Error),
}

impl Error {
    /// Create a column-not-found error
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Error::ColumnNotFound { name: name.into() }
    }

    /// Check if this is a "column not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ColumnNotFound { .. })
    }

    /// Check if this error reports an illegal cursor state or a backend failure
    pub fn is_illegal_state(&self) -> bool {
        matches!(
            self,
            Error::CursorClosed | Error::NoCurrentRow { .. } | Error::Backend(_)
        )
    }
}
