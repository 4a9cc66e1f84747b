//! The result-source seam
//!
//! A [`ResultSource`] is a read-only, forward-scrollable result set obtained
//! from some relational backend after a query has run. The cursor adapter
//! never executes SQL itself; it only reads metadata once, drives the
//! source's own navigation one step at a time, and reads typed values at the
//! source's current row.
//!
//! Column indices are 0-based throughout.

use bytes::Bytes;

use crate::error::Result;
use crate::value::Value;

/// Capability interface over a backend result set.
///
/// Implementations own whatever backend state they need. Every method is
/// synchronous and reports backend failures through [`crate::Error`].
///
/// Typed getters follow the backend's own conversion rules. A getter that
/// reads a NULL returns the type's zero value (or `None`) and makes
/// [`was_null`](ResultSource::was_null) report `true` until the next read.
pub trait ResultSource {
    /// Ordered column names, in the backend's canonical case.
    fn column_names(&self) -> Result<Vec<String>>;

    /// Seek to the first row. Returns `false` if the result is empty.
    fn first(&mut self) -> Result<bool>;

    /// Advance exactly one row. Returns `false` once past the last row.
    fn next(&mut self) -> Result<bool>;

    /// Read a column as a 32-bit integer.
    fn get_i32(&mut self, column: usize) -> Result<i32>;

    /// Read a column as a 64-bit integer.
    fn get_i64(&mut self, column: usize) -> Result<i64>;

    /// Read a column as a 32-bit float.
    fn get_f32(&mut self, column: usize) -> Result<f32>;

    /// Read a column as a 64-bit float.
    fn get_f64(&mut self, column: usize) -> Result<f64>;

    /// Read a column as text.
    fn get_string(&mut self, column: usize) -> Result<Option<String>>;

    /// Read a column as raw bytes.
    fn get_bytes(&mut self, column: usize) -> Result<Option<Bytes>>;

    /// Read a column without conversion.
    fn get_value(&mut self, column: usize) -> Result<Value>;

    /// Whether the most recent read saw a NULL.
    fn was_null(&self) -> bool;
}

impl<S: ResultSource + ?Sized> ResultSource for Box<S> {
    fn column_names(&self) -> Result<Vec<String>> {
        (**self).column_names()
    }

    fn first(&mut self) -> Result<bool> {
        (**self).first()
    }

    fn next(&mut self) -> Result<bool> {
        (**self).next()
    }

    fn get_i32(&mut self, column: usize) -> Result<i32> {
        (**self).get_i32(column)
    }

    fn get_i64(&mut self, column: usize) -> Result<i64> {
        (**self).get_i64(column)
    }

    fn get_f32(&mut self, column: usize) -> Result<f32> {
        (**self).get_f32(column)
    }

    fn get_f64(&mut self, column: usize) -> Result<f64> {
        (**self).get_f64(column)
    }

    fn get_string(&mut self, column: usize) -> Result<Option<String>> {
        (**self).get_string(column)
    }

    fn get_bytes(&mut self, column: usize) -> Result<Option<Bytes>> {
        (**self).get_bytes(column)
    }

    fn get_value(&mut self, column: usize) -> Result<Value> {
        (**self).get_value(column)
    }

    fn was_null(&self) -> bool {
        (**self).was_null()
    }
}
