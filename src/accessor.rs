//! Typed value access on the current row
//!
//! Getters read through the source's natively typed accessors and apply no
//! conversions of their own. A NULL read yields `0` for numeric getters and
//! `None` for text and blobs.
//!
//! `is_null` treats an index at or past the column count as NULL instead of
//! failing, so callers may probe beyond the known columns. Every other
//! getter rejects such an index with [`Error::ColumnIndexOutOfRange`].

use bytes::Bytes;

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::source::ResultSource;
use crate::value::{FieldType, Value};

impl<S: ResultSource> Cursor<S> {
    /// Borrow the source for a read at `index` on the current row.
    fn row_source(&mut self, index: usize) -> Result<&mut S> {
        let source = self.lifecycle.source_mut()?;
        if self.state.position().row().is_none() {
            return Err(Error::NoCurrentRow {
                position: self.state.position().as_i64(),
            });
        }
        if !self.catalog.contains_index(index) {
            return Err(Error::ColumnIndexOutOfRange {
                index,
                count: self.catalog.len(),
            });
        }
        Ok(source)
    }

    /// Read a column as a 32-bit integer
    pub fn get_int(&mut self, index: usize) -> Result<i32> {
        self.row_source(index)?.get_i32(index)
    }

    /// Read a column as a 64-bit integer
    pub fn get_long(&mut self, index: usize) -> Result<i64> {
        self.row_source(index)?.get_i64(index)
    }

    /// Read a column as a 32-bit float
    pub fn get_float(&mut self, index: usize) -> Result<f32> {
        self.row_source(index)?.get_f32(index)
    }

    /// Read a column as a 64-bit float
    pub fn get_double(&mut self, index: usize) -> Result<f64> {
        self.row_source(index)?.get_f64(index)
    }

    /// Read a column as text
    pub fn get_string(&mut self, index: usize) -> Result<Option<String>> {
        self.row_source(index)?.get_string(index)
    }

    /// Read a column as the exact stored bytes
    pub fn get_blob(&mut self, index: usize) -> Result<Option<Bytes>> {
        self.row_source(index)?.get_bytes(index)
    }

    /// Read a column without conversion
    pub fn get_value(&mut self, index: usize) -> Result<Value> {
        self.row_source(index)?.get_value(index)
    }

    /// Storage class of a column on the current row
    pub fn get_type(&mut self, index: usize) -> Result<FieldType> {
        self.get_value(index).map(|value| value.field_type())
    }

    /// Check whether a column on the current row holds NULL.
    ///
    /// Returns `true` for any index at or past the column count.
    pub fn is_null(&mut self, index: usize) -> Result<bool> {
        if self.lifecycle.is_closed() {
            return Err(Error::CursorClosed);
        }
        if !self.catalog.contains_index(index) {
            tracing::trace!(index, count = self.catalog.len(), "Null probe past last column");
            return Ok(true);
        }
        let source = self.row_source(index)?;
        source.get_value(index)?;
        Ok(source.was_null())
    }
}
