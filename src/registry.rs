//! Explicit registry of test doubles
//!
//! Platform objects under test are identified by an [`ObjectId`]. The
//! registry maps each identity to at most one double. It is an ordinary
//! value handed to test setup, never global state.
//!
//! # Example
//!
//! ```rust
//! use shadow_cursor::{Cursor, Database, ShadowRegistry, SnapshotSource};
//!
//! let db = Database::open_in_memory()?;
//! db.execute("CREATE TABLE t(id INT)")?;
//!
//! let mut shadows: ShadowRegistry<Cursor<SnapshotSource>> = ShadowRegistry::new();
//! let platform_cursor = shadows.allocate();
//! shadows.bind(platform_cursor, db.open_cursor("SELECT * FROM t")?);
//!
//! let cursor = shadows.shadow_of_mut(platform_cursor).unwrap();
//! assert!(!cursor.move_to_first()?);
//! # Ok::<(), shadow_cursor::Error>(())
//! ```

use std::fmt;

use indexmap::IndexMap;

/// Identity of a platform object that can be shadowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Raw identity value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Maps platform object identities to their test doubles.
#[derive(Debug)]
pub struct ShadowRegistry<T> {
    shadows: IndexMap<ObjectId, T>,
    next_id: u64,
}

impl<T> ShadowRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            shadows: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh object identity with no double bound yet
    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Bind `double` to `id`, returning the double it replaces
    pub fn bind(&mut self, id: ObjectId, double: T) -> Option<T> {
        let previous = self.shadows.insert(id, double);
        tracing::trace!(object = %id, replaced = previous.is_some(), "Bound shadow");
        previous
    }

    /// Allocate an identity and bind `double` to it
    pub fn register(&mut self, double: T) -> ObjectId {
        let id = self.allocate();
        self.bind(id, double);
        id
    }

    /// The double bound to `id`
    pub fn shadow_of(&self, id: ObjectId) -> Option<&T> {
        self.shadows.get(&id)
    }

    /// The double bound to `id`, mutably
    pub fn shadow_of_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.shadows.get_mut(&id)
    }

    /// Remove and return the double bound to `id`
    pub fn unbind(&mut self, id: ObjectId) -> Option<T> {
        let removed = self.shadows.shift_remove(&id);
        if removed.is_some() {
            tracing::trace!(object = %id, "Unbound shadow");
        }
        removed
    }

    /// Number of bound doubles
    pub fn len(&self) -> usize {
        self.shadows.len()
    }

    /// Check if no doubles are bound
    pub fn is_empty(&self) -> bool {
        self.shadows.is_empty()
    }

    /// Drop every binding
    pub fn clear(&mut self) {
        self.shadows.clear();
        tracing::debug!("Shadow registry cleared");
    }
}

impl<T> Default for ShadowRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
