//! Column catalog
//!
//! Column metadata is read from the result source exactly once, when a
//! cursor attaches. The catalog keeps the names in the backend's canonical
//! case and a case-insensitive name→index map. Lookups fold names with the
//! same Unicode upper-casing the backend applies to identifiers, so `"id"`
//! finds `"ID"` and `"café"` finds `"CAFÉ"`.

use indexmap::IndexMap;

use crate::config::IdentifierCase;
use crate::error::{Error, Result};
use crate::source::ResultSource;

/// Ordered column names plus a name→index lookup table.
#[derive(Debug, Clone)]
pub struct ColumnCatalog {
    /// Names as reported by the backend
    names: Vec<String>,
    /// Folded name -> first index carrying it
    index: IndexMap<String, usize>,
}

impl ColumnCatalog {
    /// Build a catalog from a list of column names
    pub fn new(names: Vec<String>) -> Self {
        let mut index = IndexMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            index.entry(fold(name)).or_insert(position);
        }
        Self { names, index }
    }

    /// Read the catalog from a result source
    pub fn read_from<S: ResultSource + ?Sized>(source: &S) -> Result<Self> {
        let names = source.column_names()?;
        tracing::trace!(columns = names.len(), "Read column metadata");
        Ok(Self::new(names))
    }

    /// Column names in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the result has no columns
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the column at `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of the first column called `name`, if any
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(&fold(name)).copied()
    }

    /// Index of the first column called `name`, or `ColumnNotFound`
    pub fn index_of_or_err(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| Error::column_not_found(name))
    }

    /// Whether `index` addresses a real column
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.names.len()
    }
}

fn fold(name: &str) -> String {
    IdentifierCase::Upper.apply(name)
}
