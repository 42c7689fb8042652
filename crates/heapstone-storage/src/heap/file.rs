//! Page-level access to a heap file.

use std::path::Path;
use std::sync::Arc;

use bytes::BytesMut;
use tracing::{debug, warn};

use heapstone_common::config::StorageConfig;
use heapstone_common::{
    HeapPageId, HeapstoneError, HeapstoneResult, Schema, TableId,
};

use super::cursor::HeapFileCursor;
use crate::file::{BackingStore, FileStore};
use crate::page::{HeapPage, PageLayout};

/// A table stored as a sequence of heap pages.
///
/// The page size is fixed when the file is constructed. Several `HeapFile`
/// values may share one store; each scan keeps its own position.
pub struct HeapFile {
    table_id: TableId,
    schema: Arc<Schema>,
    store: Arc<dyn BackingStore>,
    page_size: usize,
}

impl HeapFile {
    /// Creates a heap file over an existing store.
    pub fn new(
        table_id: TableId,
        schema: Arc<Schema>,
        store: Arc<dyn BackingStore>,
        config: &StorageConfig,
    ) -> HeapstoneResult<Self> {
        config.validate()?;
        // Reject schemas that cannot fit a single row up front.
        PageLayout::new(&schema, config.page_size)?;
        Ok(Self {
            table_id,
            schema,
            store,
            page_size: config.page_size,
        })
    }

    /// Opens the heap file at `path`, deriving the table id from the path.
    pub fn open(
        path: impl AsRef<Path>,
        schema: Arc<Schema>,
        config: &StorageConfig,
    ) -> HeapstoneResult<Self> {
        let path = path.as_ref();
        let store = FileStore::open(path)?;
        Self::new(TableId::from_path(path), schema, Arc::new(store), config)
    }

    /// Returns the table id.
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Returns the row schema.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the page size in bytes.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages in the store.
    pub fn page_count(&self) -> HeapstoneResult<u64> {
        let length = self.store.len()?;
        let page_size = self.page_size as u64;
        if length % page_size != 0 {
            warn!(
                table = %self.table_id,
                length,
                page_size,
                "store length is not a multiple of the page size"
            );
            return Err(HeapstoneError::MalformedStore {
                length,
                page_size: self.page_size,
            });
        }
        Ok(length / page_size)
    }

    /// Reads and decodes one page.
    pub fn read_page(&self, page_id: HeapPageId) -> HeapstoneResult<HeapPage> {
        if page_id.table_id() != self.table_id {
            return Err(HeapstoneError::invalid_argument(format!(
                "page {page_id} does not belong to table {}",
                self.table_id
            )));
        }

        let short_read = |actual| HeapstoneError::ShortRead {
            page_id,
            expected: self.page_size,
            actual,
        };
        let offset = page_id
            .byte_offset(self.page_size)
            .ok_or_else(|| short_read(0))?;
        let mut buf = BytesMut::zeroed(self.page_size);
        let read = self.store.fill_at(&mut buf, offset)?;
        if read < self.page_size {
            return Err(short_read(read));
        }

        debug!(page = %page_id, offset, "read heap page");
        HeapPage::from_bytes(page_id, &self.schema, buf.freeze())
    }

    /// Returns a closed cursor over every row of the file.
    pub fn scan(self: &Arc<Self>) -> HeapFileCursor {
        HeapFileCursor::new(Arc::clone(self))
    }
}

impl std::fmt::Debug for HeapFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeapFile")
            .field("table_id", &self.table_id)
            .field("schema", &self.schema)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::MemoryStore;
    use heapstone_common::{ErrorKind, FieldType};

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::unnamed(&[FieldType::Int]).unwrap())
    }

    fn file_over(data: Vec<u8>) -> HeapFile {
        HeapFile::new(
            TableId::new(3),
            schema(),
            Arc::new(MemoryStore::new(data)),
            &StorageConfig::with_page_size(256),
        )
        .unwrap()
    }

    #[test]
    fn test_page_count() {
        assert_eq!(file_over(Vec::new()).page_count().unwrap(), 0);
        assert_eq!(file_over(vec![0; 768]).page_count().unwrap(), 3);
    }

    #[test]
    fn test_page_count_malformed() {
        let err = file_over(vec![0; 300]).page_count().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStore);
    }

    #[test]
    fn test_read_page_uses_page_offset() {
        // Page 1 marks slot 0 used with value 42; page 0 is empty.
        let mut data = vec![0u8; 512];
        data[256] = 1;
        data[256 + 8..256 + 12].copy_from_slice(&42i32.to_be_bytes());
        let file = file_over(data);

        let page0 = file.read_page(HeapPageId::new(TableId::new(3), 0)).unwrap();
        assert_eq!(page0.num_used_slots(), 0);

        let page1 = file.read_page(HeapPageId::new(TableId::new(3), 1)).unwrap();
        let rows = page1.into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].to_string(), "42");
    }

    #[test]
    fn test_read_page_past_end_is_short_read() {
        let file = file_over(vec![0; 256]);
        let err = file
            .read_page(HeapPageId::new(TableId::new(3), 1))
            .unwrap_err();
        assert!(matches!(err, HeapstoneError::ShortRead { actual: 0, .. }));
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_read_page_offset_overflow_is_short_read() {
        let file = file_over(vec![0; 512]);
        assert_eq!(file.page_size(), 256);
        for page_no in [u64::MAX / 256 + 2, u64::MAX / 256, u64::MAX] {
            let err = file
                .read_page(HeapPageId::new(TableId::new(3), page_no))
                .unwrap_err();
            assert!(matches!(err, HeapstoneError::ShortRead { actual: 0, .. }));
            assert_eq!(err.kind(), ErrorKind::IoFailure);
        }
    }

    #[test]
    fn test_read_page_wrong_table() {
        let file = file_over(vec![0; 256]);
        let err = file
            .read_page(HeapPageId::new(TableId::new(4), 0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_rejects_bad_config() {
        let err = HeapFile::new(
            TableId::new(1),
            schema(),
            Arc::new(MemoryStore::new(Vec::new())),
            &StorageConfig::with_page_size(1000),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
