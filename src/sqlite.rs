//! SQLite backend
//!
//! [`Database`] is the generic SQL client the cursor's rows come from. It
//! runs statements on an embedded SQLite engine and turns each query into a
//! [`SnapshotSource`] whose column names are rendered in the configured
//! [`IdentifierCase`](crate::IdentifierCase).
//!
//! A query's rows are read out of the engine in full before the cursor
//! attaches, so memory use grows with the size of the result. Cross-type
//! reads on those rows are evaluated by the same engine with `CAST`, so a
//! REAL read as text looks exactly as SQLite prints it.

use std::rc::Rc;

use bytes::Bytes;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params, params_from_iter, Connection, OpenFlags};

use crate::config::{Config, Storage};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::snapshot::SnapshotSource;
use crate::value::Value;

/// A connection to the backing SQLite engine.
///
/// # Example
///
/// ```rust
/// use shadow_cursor::{Database, Value};
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE t(id INT, payload BINARY)")?;
/// db.execute_with_params(
///     "INSERT INTO t VALUES (?1, ?2)",
///     &[Value::Integer(1), Value::from(vec![0xCAu8, 0xFE])],
/// )?;
///
/// let mut cursor = db.open_cursor("SELECT payload FROM t")?;
/// assert!(cursor.move_to_first()?);
/// assert_eq!(cursor.get_blob(0)?.unwrap().as_ref(), &[0xCAu8, 0xFE]);
/// # Ok::<(), shadow_cursor::Error>(())
/// ```
#[derive(Debug)]
pub struct Database {
    conn: Rc<Connection>,
    config: Config,
}

impl Database {
    /// Open a database described by `config`
    pub fn open(config: Config) -> Result<Self> {
        let conn = match &config.storage {
            Storage::Memory => Connection::open_in_memory()?,
            Storage::File(path) => {
                let flags = if config.read_only {
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
                } else {
                    OpenFlags::default()
                };
                Connection::open_with_flags(path, flags)?
            }
        };
        conn.busy_timeout(config.busy_timeout)?;
        if config.read_only && config.is_memory() {
            conn.pragma_update(None, "query_only", true)?;
        }

        tracing::debug!(config = %config, "Opened database");
        Ok(Self {
            conn: Rc::new(conn),
            config,
        })
    }

    /// Open a private in-memory database with default settings
    pub fn open_in_memory() -> Result<Self> {
        Self::open(Config::in_memory())
    }

    /// Configuration this database was opened with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute a single statement, returning the number of rows changed
    pub fn execute(&self, sql: &str) -> Result<usize> {
        self.execute_with_params(sql, &[])
    }

    /// Execute a single statement with positional parameters
    pub fn execute_with_params(&self, sql: &str, params: &[Value]) -> Result<usize> {
        let changed = self
            .conn
            .execute(sql.trim(), params_from_iter(params.iter().map(to_sql_value)))?;
        tracing::trace!(sql = sql, changed, "Executed statement");
        Ok(changed)
    }

    /// Execute several `;`-separated statements
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        tracing::trace!(sql = sql, "Executed batch");
        Ok(())
    }

    /// Run a query and capture its result
    pub fn query(&self, sql: &str) -> Result<SnapshotSource> {
        self.query_with_params(sql, &[])
    }

    /// Run a query with positional parameters and capture its result
    pub fn query_with_params(&self, sql: &str, params: &[Value]) -> Result<SnapshotSource> {
        let mut stmt = self.conn.prepare(sql.trim())?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|name| self.config.identifier_case.apply(name))
            .collect();
        let width = columns.len();

        let mut rows = stmt.query(params_from_iter(params.iter().map(to_sql_value)))?;
        let mut captured = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                values.push(from_value_ref(row.get_ref(index)?)?);
            }
            captured.push(values);
        }

        tracing::trace!(sql = sql, columns = width, rows = captured.len(), "Captured result");
        SnapshotSource::with_coercion(columns, captured, Coercion::new(Rc::clone(&self.conn)))
    }

    /// Run a query and attach a cursor to its result
    pub fn open_cursor(&self, sql: &str) -> Result<Cursor<SnapshotSource>> {
        Cursor::attach(self.query(sql)?)
    }

    /// Run a query with positional parameters and attach a cursor to its result
    pub fn open_cursor_with_params(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Cursor<SnapshotSource>> {
        Cursor::attach(self.query_with_params(sql, params)?)
    }
}

/// Storage-class conversions evaluated by the SQLite engine.
///
/// Reads that match the stored class are answered directly. Anything else is
/// handed to the engine as `CAST(?1 AS <class>)`.
#[derive(Debug, Clone)]
pub(crate) struct Coercion {
    conn: Rc<Connection>,
}

impl Coercion {
    pub(crate) fn new(conn: Rc<Connection>) -> Self {
        Self { conn }
    }

    /// Conversions backed by a private in-memory engine
    pub(crate) fn standalone() -> Result<Self> {
        Ok(Self::new(Rc::new(Connection::open_in_memory()?)))
    }

    pub(crate) fn to_i64(&self, value: &Value) -> Result<i64> {
        match value {
            Value::Null => Ok(0),
            Value::Integer(i) => Ok(*i),
            _ => self.cast(value, "SELECT CAST(?1 AS INTEGER)", |v| match v {
                ValueRef::Integer(i) => i,
                _ => 0,
            }),
        }
    }

    pub(crate) fn to_f64(&self, value: &Value) -> Result<f64> {
        match value {
            Value::Null => Ok(0.0),
            Value::Float(f) => Ok(*f),
            _ => self.cast(value, "SELECT CAST(?1 AS REAL)", |v| match v {
                ValueRef::Real(f) => f,
                ValueRef::Integer(i) => i as f64,
                _ => 0.0,
            }),
        }
    }

    pub(crate) fn to_text(&self, value: &Value) -> Result<Option<String>> {
        match value {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            // The engine reinterprets blob bytes as text without conversion
            Value::Blob(b) => Ok(Some(String::from_utf8_lossy(b).into_owned())),
            Value::Integer(_) | Value::Float(_) => self
                .cast(value, "SELECT CAST(?1 AS TEXT)", |v| match v {
                    ValueRef::Text(b) => String::from_utf8_lossy(b).into_owned(),
                    _ => String::new(),
                })
                .map(Some),
        }
    }

    pub(crate) fn to_bytes(&self, value: &Value) -> Result<Option<Bytes>> {
        match value {
            Value::Null => Ok(None),
            Value::Blob(b) => Ok(Some(b.clone())),
            Value::Text(s) => Ok(Some(Bytes::copy_from_slice(s.as_bytes()))),
            Value::Integer(_) | Value::Float(_) => Ok(self.to_text(value)?.map(Bytes::from)),
        }
    }

    fn cast<T>(
        &self,
        value: &Value,
        sql: &str,
        read: impl FnOnce(ValueRef<'_>) -> T,
    ) -> Result<T> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let converted = stmt.query_row(params![to_sql_value(value)], |row| {
            row.get_ref(0).map(read)
        })?;
        Ok(converted)
    }
}

fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Float(f) => SqlValue::Real(*f),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Blob(b) => SqlValue::Blob(b.to_vec()),
    }
}

fn from_value_ref(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) => {
            let s = std::str::from_utf8(bytes).map_err(|e| {
                Error::DataConversion(format!("invalid UTF-8 in text column: {}", e))
            })?;
            Value::Text(s.to_string())
        }
        ValueRef::Blob(bytes) => Value::from(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentifierCase;
    use crate::source::ResultSource;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.config().is_memory());
    }

    #[test]
    fn test_query_captures_rows() {
        let db = Database::open_in_memory().unwrap();
        let mut source = db.query("SELECT 1 + 2, 'ab' || 'cd', NULL, x'00ff'").unwrap();
        assert_eq!(source.row_count(), 1);
        assert!(source.first().unwrap());
        assert_eq!(source.get_value(0).unwrap(), Value::Integer(3));
        assert_eq!(source.get_value(1).unwrap(), Value::from("abcd"));
        assert!(source.get_value(2).unwrap().is_null());
        assert_eq!(source.get_value(3).unwrap(), Value::from(vec![0u8, 0xff]));
    }

    #[test]
    fn test_identifier_case() {
        let db = Database::open(Config::in_memory().identifier_case(IdentifierCase::Preserve))
            .unwrap();
        db.execute("CREATE TABLE t(Mixed_Case INT)").unwrap();
        let source = db.query("SELECT * FROM t").unwrap();
        assert_eq!(source.column_names().unwrap(), vec!["Mixed_Case".to_string()]);

        let db = Database::open_in_memory().unwrap();
        db.execute("CREATE TABLE t(Mixed_Case INT)").unwrap();
        let source = db.query("SELECT * FROM t").unwrap();
        assert_eq!(source.column_names().unwrap(), vec!["MIXED_CASE".to_string()]);
    }

    #[test]
    fn test_execute_with_params() {
        let db = Database::open_in_memory().unwrap();
        db.execute("CREATE TABLE t(id INT, name TEXT)").unwrap();
        let changed = db
            .execute_with_params(
                "INSERT INTO t VALUES (?1, ?2)",
                &[Value::Integer(7), Value::from("seven")],
            )
            .unwrap();
        assert_eq!(changed, 1);

        let source = db
            .query_with_params("SELECT name FROM t WHERE id = ?1", &[Value::Integer(7)])
            .unwrap();
        assert_eq!(source.row_count(), 1);
    }

    #[test]
    fn test_real_text_matches_engine() {
        let db = Database::open_in_memory().unwrap();
        let mut source = db
            .query(
                "SELECT 0.1 + 0.2, CAST(0.1 + 0.2 AS TEXT), 1e20, CAST(1e20 AS TEXT), \
                 3.0, CAST(3.0 AS TEXT)",
            )
            .unwrap();
        assert!(source.first().unwrap());
        for column in [0, 2, 4] {
            assert_eq!(
                source.get_string(column).unwrap(),
                source.get_string(column + 1).unwrap()
            );
        }
        assert_eq!(source.get_string(0).unwrap().as_deref(), Some("0.3"));
        assert_eq!(source.get_string(2).unwrap().as_deref(), Some("1.0e+20"));
        assert_eq!(source.get_string(4).unwrap().as_deref(), Some("3.0"));
    }

    #[test]
    fn test_text_numbers_match_engine() {
        let db = Database::open_in_memory().unwrap();
        let mut source = db
            .query(
                "SELECT '1e3', CAST('1e3' AS INTEGER), CAST('1e3' AS REAL), \
                 ' -17abc', CAST(' -17abc' AS INTEGER), 1e20, CAST(1e20 AS INTEGER)",
            )
            .unwrap();
        assert!(source.first().unwrap());
        assert_eq!(source.get_i64(0).unwrap(), source.get_i64(1).unwrap());
        assert_eq!(source.get_f64(0).unwrap(), source.get_f64(2).unwrap());
        assert_eq!(source.get_i64(3).unwrap(), source.get_i64(4).unwrap());
        assert_eq!(source.get_i64(3).unwrap(), -17);
        assert_eq!(source.get_i64(5).unwrap(), source.get_i64(6).unwrap());
        assert_eq!(source.get_i64(5).unwrap(), i64::MAX);
    }

    #[test]
    fn test_read_only_memory_rejects_writes() {
        let db = Database::open("mem:?read_only=true".parse().unwrap()).unwrap();
        assert_eq!(db.query("SELECT 1").unwrap().row_count(), 1);
        let err = db.execute("CREATE TABLE t(id INT)").unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }

    #[test]
    fn test_backend_error() {
        let db = Database::open_in_memory().unwrap();
        let err = db.query("SELECT * FROM missing_table").unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
        assert!(err.is_illegal_state());
    }
}
