#![warn(missing_docs)]

//! # shadow-cursor
//!
//! The mobile platform's result-cursor contract, running on an ordinary
//! relational backend. Code written against the platform cursor (column
//! lookup by name or index, typed reads, null tests, forward navigation and
//! explicit close) can be exercised in plain Rust tests without the
//! platform's native database engine.
//!
//! ## Features
//!
//! - **Backend independent** - any type implementing [`ResultSource`] can feed a [`Cursor`]
//! - **Embedded SQLite** - [`Database`] runs real SQL and hands back live results
//! - **Platform parity** - case-insensitive column lookup, `-1`/error lookup duality,
//!   NULL probes past the last column, idempotent close
//! - **Explicit shadows** - [`ShadowRegistry`] maps platform objects to their doubles
//!   without global state
//!
//! ## Quick Start
//!
//! ```rust
//! use shadow_cursor::Database;
//!
//! let db = Database::open_in_memory()?;
//! db.execute_batch(
//!     "CREATE TABLE table_name(id INT PRIMARY KEY, name VARCHAR(255), long_value BIGINT);
//!      INSERT INTO table_name (id, name, long_value) VALUES (1234, 'Chuck', 3463);
//!      INSERT INTO table_name (id, name) VALUES (1235, 'Julie');",
//! )?;
//!
//! let mut cursor = db.open_cursor("SELECT * FROM table_name")?;
//! assert_eq!(cursor.column_index("id"), Some(0));
//! assert_eq!(cursor.column_index("Fred"), None);
//!
//! assert!(cursor.move_to_first()?);
//! assert_eq!(cursor.get_int(0)?, 1234);
//! assert_eq!(cursor.get_string(1)?.as_deref(), Some("Chuck"));
//!
//! assert!(cursor.move_to_next()?);
//! assert!(cursor.is_null(2)?);
//! assert!(cursor.is_null(3)?); // past the last column
//!
//! cursor.close();
//! assert!(cursor.is_closed());
//! # Ok::<(), shadow_cursor::Error>(())
//! ```
//!
//! ## Custom Backends
//!
//! Implement [`ResultSource`] for a result set from any client that offers
//! metadata, forward navigation and typed reads, then call [`Cursor::attach`].
//! [`SnapshotSource`] is a ready-made in-memory implementation.

pub mod accessor;
pub mod catalog;
pub mod config;
pub mod cursor;
pub mod error;
pub mod lifecycle;
pub mod position;
pub mod registry;
pub mod snapshot;
pub mod source;
pub mod sqlite;
pub mod value;

// Re-export commonly used types
pub use catalog::ColumnCatalog;
pub use config::{Config, IdentifierCase, Storage};
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use lifecycle::Lifecycle;
pub use position::{Position, PositionState};
pub use registry::{ObjectId, ShadowRegistry};
pub use snapshot::SnapshotSource;
pub use source::ResultSource;
pub use sqlite::Database;
pub use value::{FieldType, Value};

// Re-export bytes for users reading blob columns
pub use bytes;
