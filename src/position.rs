//! Cursor position tracking
//!
//! The position mirrors the backend's forward scroll one step at a time:
//! every successful advance on the source moves [`Position`] by exactly one
//! row and no rows are buffered here.

use crate::error::Result;
use crate::source::ResultSource;

/// Where a cursor sits relative to its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Before the first row (initial state)
    #[default]
    BeforeFirst,
    /// On a valid row, 0-based
    OnRow(usize),
    /// Past the last row; `rows` is the number of rows the result held
    AfterLast {
        /// Rows seen before reaching the end
        rows: usize,
    },
}

impl Position {
    /// Platform-style numeric position.
    ///
    /// `-1` before the first row, the row index on a row, and the row
    /// count once past the end.
    pub fn as_i64(&self) -> i64 {
        match self {
            Position::BeforeFirst => -1,
            Position::OnRow(index) => *index as i64,
            Position::AfterLast { rows } => *rows as i64,
        }
    }

    /// Current row index, if on a row
    pub fn row(&self) -> Option<usize> {
        match self {
            Position::OnRow(index) => Some(*index),
            _ => None,
        }
    }
}

/// Navigation state machine driving a [`ResultSource`].
#[derive(Debug, Clone, Default)]
pub struct PositionState {
    position: Position,
}

impl PositionState {
    /// Start before the first row
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Re-seek the source to its first row.
    ///
    /// On an empty result this settles past the end and returns `false`.
    pub fn move_to_first<S: ResultSource + ?Sized>(&mut self, source: &mut S) -> Result<bool> {
        let found = source.first()?;
        self.position = if found {
            Position::OnRow(0)
        } else {
            Position::AfterLast { rows: 0 }
        };
        tracing::trace!(position = self.position.as_i64(), "Moved to first row");
        Ok(found)
    }

    /// Advance exactly one row.
    ///
    /// Once past the end this is a no-op that returns `false` without
    /// touching the source.
    pub fn move_to_next<S: ResultSource + ?Sized>(&mut self, source: &mut S) -> Result<bool> {
        let next_index = match self.position {
            Position::BeforeFirst => 0,
            Position::OnRow(index) => index + 1,
            Position::AfterLast { .. } => return Ok(false),
        };

        let found = source.next()?;
        self.position = if found {
            Position::OnRow(next_index)
        } else {
            Position::AfterLast { rows: next_index }
        };
        tracing::trace!(position = self.position.as_i64(), "Advanced cursor");
        Ok(found)
    }
}
