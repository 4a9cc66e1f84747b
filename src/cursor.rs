//! Platform cursor over a result source
//!
//! [`Cursor`] exposes the mobile platform's result-cursor contract (column
//! lookup, forward navigation, typed reads, explicit close) on top of any
//! [`ResultSource`].
//!
//! # Example
//!
//! ```rust
//! use shadow_cursor::Database;
//!
//! let db = Database::open_in_memory()?;
//! db.execute_batch(
//!     "CREATE TABLE people(id INT PRIMARY KEY, name VARCHAR(255));
//!      INSERT INTO people VALUES (1234, 'Chuck'), (1235, 'Julie');",
//! )?;
//!
//! let mut cursor = db.open_cursor("SELECT * FROM people")?;
//! assert_eq!(cursor.column_names(), &["ID".to_string(), "NAME".to_string()]);
//!
//! let name = cursor.column_index_or_throw("name")?;
//! while cursor.move_to_next()? {
//!     println!("{:?}", cursor.get_string(name)?);
//! }
//! cursor.close();
//! # Ok::<(), shadow_cursor::Error>(())
//! ```

use crate::catalog::ColumnCatalog;
use crate::error::Result;
use crate::lifecycle::Lifecycle;
use crate::position::{Position, PositionState};
use crate::source::ResultSource;

/// A navigable, read-only view over one query's rows.
///
/// The column list is fixed when the cursor attaches. Navigation drives the
/// source directly, one row per call. Once [`close`](Cursor::close) runs the
/// source is released and only [`is_closed`](Cursor::is_closed) and the
/// catalog accessors remain meaningful.
#[derive(Debug)]
pub struct Cursor<S> {
    pub(crate) catalog: ColumnCatalog,
    pub(crate) state: PositionState,
    pub(crate) lifecycle: Lifecycle<S>,
}

impl<S: ResultSource> Cursor<S> {
    /// Attach to a live result source, reading its column metadata once.
    pub fn attach(source: S) -> Result<Self> {
        let catalog = ColumnCatalog::read_from(&source)?;
        tracing::trace!(columns = catalog.len(), "Cursor attached");
        Ok(Self {
            catalog,
            state: PositionState::new(),
            lifecycle: Lifecycle::open(source),
        })
    }

    /// Column names in the backend's canonical case
    pub fn column_names(&self) -> &[String] {
        self.catalog.names()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.catalog.len()
    }

    /// Name of the column at `index`
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.catalog.name(index)
    }

    /// Index of the column called `name`, or `None` if absent
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.catalog.index_of(name)
    }

    /// Index of the column called `name`.
    ///
    /// Fails with [`crate::Error::ColumnNotFound`] when absent.
    pub fn column_index_or_throw(&self, name: &str) -> Result<usize> {
        self.catalog.index_of_or_err(name)
    }

    /// Move to the first row; `false` on an empty result
    pub fn move_to_first(&mut self) -> Result<bool> {
        let source = self.lifecycle.source_mut()?;
        self.state.move_to_first(source)
    }

    /// Move to the next row; `false` once past the last row
    pub fn move_to_next(&mut self) -> Result<bool> {
        let source = self.lifecycle.source_mut()?;
        self.state.move_to_next(source)
    }

    /// Current position: row index, `-1` before the first row, or the row
    /// count once past the last row
    pub fn position(&self) -> i64 {
        self.state.position().as_i64()
    }

    /// Current position as a state value
    pub fn cursor_position(&self) -> Position {
        self.state.position()
    }

    /// Check if the cursor is before the first row
    pub fn is_before_first(&self) -> bool {
        self.state.position() == Position::BeforeFirst
    }

    /// Check if the cursor is past the last row
    pub fn is_after_last(&self) -> bool {
        matches!(self.state.position(), Position::AfterLast { .. })
    }

    /// Check if the cursor is on the first row
    pub fn is_first(&self) -> bool {
        self.state.position() == Position::OnRow(0)
    }

    /// Close the cursor and release its source. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.lifecycle.close().is_some() {
            tracing::debug!(position = self.position(), "Cursor closed");
        }
    }

    /// Check if the cursor has been closed
    pub fn is_closed(&self) -> bool {
        self.lifecycle.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::snapshot::SnapshotSource;
    use crate::value::Value;

    fn cursor(rows: i64) -> Cursor<SnapshotSource> {
        let source = SnapshotSource::new(
            vec!["ID".to_string(), "NAME".to_string()],
            (0..rows)
                .map(|i| vec![Value::Integer(i), Value::from(format!("row{}", i))])
                .collect(),
        )
        .unwrap();
        Cursor::attach(source).unwrap()
    }

    #[test]
    fn test_cursor_creation() {
        let cursor = cursor(2);
        assert_eq!(cursor.column_count(), 2);
        assert_eq!(cursor.column_name(0), Some("ID"));
        assert!(cursor.is_before_first());
        assert_eq!(cursor.position(), -1);
        assert!(!cursor.is_closed());
    }

    #[test]
    fn test_column_lookup() {
        let cursor = cursor(0);
        assert_eq!(cursor.column_index("name"), Some(1));
        assert_eq!(cursor.column_index("Fred"), None);
        assert_eq!(cursor.column_index_or_throw("id").unwrap(), 0);
        assert!(cursor.column_index_or_throw("Fred").unwrap_err().is_not_found());
    }

    #[test]
    fn test_position_flags() {
        let mut cursor = cursor(2);
        assert!(cursor.move_to_first().unwrap());
        assert!(cursor.is_first());
        assert!(cursor.move_to_next().unwrap());
        assert!(!cursor.is_first());
        assert!(!cursor.move_to_next().unwrap());
        assert!(cursor.is_after_last());
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.cursor_position(), Position::AfterLast { rows: 2 });
    }

    #[test]
    fn test_cursor_close() {
        let mut cursor = cursor(1);
        cursor.close();
        assert!(cursor.is_closed());
        cursor.close();
        assert!(cursor.is_closed());
    }

    #[test]
    fn test_navigation_after_close() {
        let mut cursor = cursor(1);
        cursor.close();
        assert!(matches!(cursor.move_to_first(), Err(Error::CursorClosed)));
        assert!(matches!(cursor.move_to_next(), Err(Error::CursorClosed)));
    }

    #[test]
    fn test_boxed_source() {
        let source: Box<dyn ResultSource> =
            Box::new(SnapshotSource::empty(vec!["ID".to_string()]).unwrap());
        let mut cursor = Cursor::attach(source).unwrap();
        assert_eq!(cursor.column_names(), &["ID".to_string()]);
        assert!(!cursor.move_to_first().unwrap());
    }
}
