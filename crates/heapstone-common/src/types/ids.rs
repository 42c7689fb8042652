//! Identifier types for tables, pages and rows.
//!
//! These types provide type-safe wrappers around numeric identifiers,
//! preventing accidental misuse of different ID types.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Table identifier - uniquely identifies one table (one backing store).
///
/// # Example
///
/// ```rust
/// use heapstone_common::types::TableId;
///
/// let table = TableId::new(42);
/// assert_eq!(table.as_u64(), 42);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TableId(u64);

impl TableId {
    /// Creates a new `TableId` from a raw u64 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derives a table id from the absolute path of its backing file.
    ///
    /// The same path always maps to the same id within a process.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let mut hasher = DefaultHasher::new();
        absolute.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Returns the raw u64 value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TableId {
    #[inline]
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Page identifier within a heap file.
///
/// Equality and hashing cover both the table and the page number, so the
/// same page number in two tables never collides as a cache key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HeapPageId {
    table_id: TableId,
    page_no: u64,
}

impl HeapPageId {
    /// Creates a page id for page `page_no` of `table_id`.
    #[inline]
    #[must_use]
    pub const fn new(table_id: TableId, page_no: u64) -> Self {
        Self { table_id, page_no }
    }

    /// Returns the owning table.
    #[inline]
    #[must_use]
    pub const fn table_id(self) -> TableId {
        self.table_id
    }

    /// Returns the page number within the table.
    #[inline]
    #[must_use]
    pub const fn page_no(self) -> u64 {
        self.page_no
    }

    /// Returns the id of the following page in the same table.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            table_id: self.table_id,
            page_no: self.page_no.saturating_add(1),
        }
    }

    /// Byte offset of this page in a store with the given page size, or
    /// `None` if it does not fit a `u64`.
    #[inline]
    #[must_use]
    pub const fn byte_offset(self, page_size: usize) -> Option<u64> {
        self.page_no.checked_mul(page_size as u64)
    }
}

impl fmt::Debug for HeapPageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeapPageId({}:{})", self.table_id.0, self.page_no)
    }
}

impl fmt::Display for HeapPageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table_id.0, self.page_no)
    }
}

/// Physical location of a row: its page plus the slot within that page.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId {
    page_id: HeapPageId,
    slot: u32,
}

impl RecordId {
    /// Creates a record id.
    #[inline]
    #[must_use]
    pub const fn new(page_id: HeapPageId, slot: u32) -> Self {
        Self { page_id, slot }
    }

    /// Returns the page holding the row.
    #[inline]
    #[must_use]
    pub const fn page_id(self) -> HeapPageId {
        self.page_id
    }

    /// Returns the slot number within the page.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.slot
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({}#{})", self.page_id, self.slot)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.page_id, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_page_id_equality_covers_table() {
        let a = HeapPageId::new(TableId::new(1), 5);
        let b = HeapPageId::new(TableId::new(2), 5);
        let c = HeapPageId::new(TableId::new(1), 5);
        assert_ne!(a, b);
        assert_eq!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_page_id_offset() {
        let id = HeapPageId::new(TableId::new(9), 3);
        assert_eq!(id.byte_offset(4096), Some(3 * 4096));
        assert_eq!(HeapPageId::new(TableId::new(9), u64::MAX / 256 + 2).byte_offset(256), None);
        assert_eq!(id.next().page_no(), 4);
        assert_eq!(id.next().table_id(), TableId::new(9));
    }

    #[test]
    fn test_record_id() {
        let page = HeapPageId::new(TableId::new(1), 2);
        let rid = RecordId::new(page, 7);
        assert_eq!(rid.page_id(), page);
        assert_eq!(rid.slot(), 7);
        assert_eq!(rid.to_string(), "1:2#7");
        assert_eq!(rid, RecordId::new(HeapPageId::new(TableId::new(1), 2), 7));
    }

    #[test]
    fn test_table_id_from_path_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.dat");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(TableId::from_path(&path), TableId::from_path(&path));
    }
}
