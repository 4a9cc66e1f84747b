//! Scroll-insensitive result sets
//!
//! A [`SnapshotSource`] holds the metadata and rows a query produced at
//! execution time. Later writes to the database do not show through, so a
//! fresh query is needed to observe them, exactly like a scroll-insensitive
//! JDBC result set.
//!
//! Every row lives in memory for the lifetime of the snapshot. Reads in a
//! storage class other than the stored one are converted by SQLite.

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::source::ResultSource;
use crate::sqlite::Coercion;
use crate::value::Value;

/// Where the snapshot's own row pointer sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowPointer {
    BeforeFirst,
    OnRow(usize),
    AfterLast,
}

/// An in-memory, read-only result set that implements [`ResultSource`].
///
/// # Example
///
/// ```rust
/// use shadow_cursor::{ResultSource, SnapshotSource, Value};
///
/// let mut source = SnapshotSource::new(
///     vec!["ID".into(), "NAME".into()],
///     vec![vec![Value::Integer(1234), Value::from("Chuck")]],
/// )?;
///
/// assert!(source.first()?);
/// assert_eq!(source.get_i32(0)?, 1234);
/// assert!(!source.next()?);
/// # Ok::<(), shadow_cursor::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    pointer: RowPointer,
    last_was_null: bool,
    coercion: Coercion,
}

impl SnapshotSource {
    /// Create a snapshot from column names and rows.
    ///
    /// Every row must carry exactly one value per column. Cross-type reads
    /// are evaluated by a private in-memory SQLite engine.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        Self::with_coercion(columns, rows, Coercion::standalone()?)
    }

    pub(crate) fn with_coercion(
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
        coercion: Coercion,
    ) -> Result<Self> {
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != columns.len())
        {
            return Err(Error::RowShape {
                row,
                expected: columns.len(),
                actual: values.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            pointer: RowPointer::BeforeFirst,
            last_was_null: false,
            coercion,
        })
    }

    /// Create a snapshot with columns but no rows
    pub fn empty(columns: Vec<String>) -> Result<Self> {
        Self::new(columns, Vec::new())
    }

    /// Number of rows captured
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn read<T>(
        &mut self,
        column: usize,
        convert: impl FnOnce(&Coercion, &Value) -> Result<T>,
    ) -> Result<T> {
        let value = self.cell(column)?.clone();
        convert(&self.coercion, &value)
    }

    fn cell(&mut self, column: usize) -> Result<&Value> {
        let index = match self.pointer {
            RowPointer::OnRow(index) => index,
            RowPointer::BeforeFirst => return Err(Error::NoCurrentRow { position: -1 }),
            RowPointer::AfterLast => {
                return Err(Error::NoCurrentRow {
                    position: self.rows.len() as i64,
                })
            }
        };
        let count = self.columns.len();
        let value = self.rows[index]
            .get(column)
            .ok_or(Error::ColumnIndexOutOfRange { index: column, count })?;
        self.last_was_null = value.is_null();
        Ok(value)
    }
}

impl ResultSource for SnapshotSource {
    fn column_names(&self) -> Result<Vec<String>> {
        Ok(self.columns.clone())
    }

    fn first(&mut self) -> Result<bool> {
        self.pointer = if self.rows.is_empty() {
            RowPointer::AfterLast
        } else {
            RowPointer::OnRow(0)
        };
        Ok(!self.rows.is_empty())
    }

    fn next(&mut self) -> Result<bool> {
        self.pointer = match self.pointer {
            RowPointer::BeforeFirst if !self.rows.is_empty() => RowPointer::OnRow(0),
            RowPointer::OnRow(i) if i + 1 < self.rows.len() => RowPointer::OnRow(i + 1),
            _ => RowPointer::AfterLast,
        };
        Ok(matches!(self.pointer, RowPointer::OnRow(_)))
    }

    fn get_i32(&mut self, column: usize) -> Result<i32> {
        // Low 32 bits of the 64-bit read
        self.get_i64(column).map(|i| i as i32)
    }

    fn get_i64(&mut self, column: usize) -> Result<i64> {
        self.read(column, Coercion::to_i64)
    }

    fn get_f32(&mut self, column: usize) -> Result<f32> {
        self.get_f64(column).map(|f| f as f32)
    }

    fn get_f64(&mut self, column: usize) -> Result<f64> {
        self.read(column, Coercion::to_f64)
    }

    fn get_string(&mut self, column: usize) -> Result<Option<String>> {
        self.read(column, Coercion::to_text)
    }

    fn get_bytes(&mut self, column: usize) -> Result<Option<Bytes>> {
        self.read(column, Coercion::to_bytes)
    }

    fn get_value(&mut self, column: usize) -> Result<Value> {
        self.cell(column).cloned()
    }

    fn was_null(&self) -> bool {
        self.last_was_null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> SnapshotSource {
        SnapshotSource::new(
            vec!["ID".to_string(), "NAME".to_string(), "LONG_VALUE".to_string()],
            vec![
                vec![Value::Integer(1234), Value::from("Chuck"), Value::Integer(3463)],
                vec![Value::Integer(1235), Value::from("Julie"), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_row_shape_mismatch() {
        let result = SnapshotSource::new(
            vec!["A".to_string(), "B".to_string()],
            vec![vec![Value::Integer(1), Value::Integer(2)], vec![Value::Integer(3)]],
        );
        assert!(matches!(
            result,
            Err(Error::RowShape { row: 1, expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_forward_navigation() {
        let mut source = people();
        assert!(source.next().unwrap());
        assert_eq!(source.get_i32(0).unwrap(), 1234);
        assert!(source.next().unwrap());
        assert_eq!(source.get_i32(0).unwrap(), 1235);
        assert!(!source.next().unwrap());
        assert!(!source.next().unwrap());
    }

    #[test]
    fn test_first_reseeks() {
        let mut source = people();
        source.next().unwrap();
        source.next().unwrap();
        source.next().unwrap();
        assert!(source.first().unwrap());
        assert_eq!(source.get_string(1).unwrap().as_deref(), Some("Chuck"));
    }

    #[test]
    fn test_empty_source() {
        let mut source = SnapshotSource::empty(vec!["ID".to_string()]).unwrap();
        assert_eq!(source.column_names().unwrap(), vec!["ID".to_string()]);
        assert!(!source.first().unwrap());
        assert!(!source.next().unwrap());
    }

    #[test]
    fn test_was_null_tracks_last_read() {
        let mut source = people();
        source.first().unwrap();
        source.next().unwrap();

        assert_eq!(source.get_i64(2).unwrap(), 0);
        assert!(source.was_null());

        assert_eq!(source.get_i64(0).unwrap(), 1235);
        assert!(!source.was_null());
    }

    #[test]
    fn test_read_off_row() {
        let mut source = people();
        assert!(matches!(
            source.get_i32(0),
            Err(Error::NoCurrentRow { position: -1 })
        ));

        source.first().unwrap();
        source.next().unwrap();
        source.next().unwrap();
        assert!(matches!(
            source.get_i32(0),
            Err(Error::NoCurrentRow { position: 2 })
        ));
    }

    #[test]
    fn test_cross_type_reads() {
        let mut source = SnapshotSource::new(
            vec!["N".to_string(), "R".to_string(), "T".to_string()],
            vec![vec![Value::Integer((1i64 << 32) + 7), Value::Float(3.9), Value::from("42abc")]],
        )
        .unwrap();
        source.first().unwrap();

        assert_eq!(source.get_i32(0).unwrap(), 7);
        assert_eq!(source.get_string(0).unwrap().as_deref(), Some("4294967303"));
        assert_eq!(source.get_i64(1).unwrap(), 3);
        assert_eq!(source.get_f32(1).unwrap(), 3.9f32);
        assert_eq!(source.get_string(1).unwrap().as_deref(), Some("3.9"));
        assert_eq!(source.get_bytes(1).unwrap().unwrap().as_ref(), b"3.9");
        assert_eq!(source.get_i64(2).unwrap(), 42);
        assert_eq!(source.get_f64(2).unwrap(), 42.0);
        assert_eq!(source.get_bytes(2).unwrap().unwrap().as_ref(), b"42abc");
    }

    #[test]
    fn test_read_past_width() {
        let mut source = people();
        source.first().unwrap();
        assert!(matches!(
            source.get_value(3),
            Err(Error::ColumnIndexOutOfRange { index: 3, count: 3 })
        ));
    }
}
