//! End-to-end heap file scans over in-memory and on-disk stores.

use std::sync::Arc;
use std::thread;

use heapstone_common::config::StorageConfig;
use heapstone_common::{ErrorKind, FieldType, HeapPageId, Row, Schema, TableId, Value};
use heapstone_storage::{
    BackingStore, FileStore, HeapFile, HeapFileCursor, HeapFileEncoder, HeapPageBuilder,
    MemoryStore,
};

const PAGE_SIZE: usize = 256;

fn schema() -> Arc<Schema> {
    Arc::new(Schema::from_types(&[FieldType::Int, FieldType::Int], &["a", "b"]).unwrap())
}

fn row(schema: &Arc<Schema>, a: i32, b: i32) -> Row {
    Row::from_values(schema.clone(), vec![Value::int(a), Value::int(b)]).unwrap()
}

/// Builds `pages` pages holding `per_page` rows each, numbered `(page, slot)`.
fn image(pages: i32, per_page: i32) -> Vec<u8> {
    let schema = schema();
    let mut out = Vec::new();
    for p in 0..pages {
        let mut builder = HeapPageBuilder::new(schema.clone(), PAGE_SIZE).unwrap();
        for s in 0..per_page {
            builder.add_row(&row(&schema, p, s)).unwrap();
        }
        out.extend_from_slice(&builder.build());
    }
    out
}

fn heap_file(store: Arc<dyn BackingStore>) -> Arc<HeapFile> {
    Arc::new(
        HeapFile::new(
            TableId::new(11),
            schema(),
            store,
            &StorageConfig::with_page_size(PAGE_SIZE),
        )
        .unwrap(),
    )
}

fn drain(cursor: &mut HeapFileCursor) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    while cursor.has_next().unwrap() {
        let row = cursor.next().unwrap();
        let a = row.get(0).unwrap().and_then(Value::as_int).unwrap();
        let b = row.get(1).unwrap().and_then(Value::as_int).unwrap();
        out.push((a, b));
    }
    out
}

#[test]
fn test_scan_yields_page_then_slot_order() {
    let file = heap_file(Arc::new(MemoryStore::new(image(4, 5))));
    let mut cursor = file.scan();
    cursor.open().unwrap();

    let expected: Vec<(i32, i32)> = (0..4).flat_map(|p| (0..5).map(move |s| (p, s))).collect();
    assert_eq!(drain(&mut cursor), expected);

    cursor.rewind().unwrap();
    assert_eq!(drain(&mut cursor), expected);
    cursor.close();
}

#[test]
fn test_rows_carry_locators() {
    let file = heap_file(Arc::new(MemoryStore::new(image(2, 3))));
    let mut cursor = file.scan();
    cursor.open().unwrap();

    let mut locators = Vec::new();
    while cursor.has_next().unwrap() {
        let rid = cursor.next().unwrap().record_id().unwrap();
        locators.push((rid.page_id().page_no(), rid.slot()));
    }
    assert_eq!(locators, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
}

#[test]
fn test_empty_pages_are_skipped() {
    let mut data = image(1, 2);
    data.extend_from_slice(&[0u8; PAGE_SIZE]);
    data.extend_from_slice(&image(1, 1));

    let file = heap_file(Arc::new(MemoryStore::new(data)));
    let mut cursor = file.scan();
    cursor.open().unwrap();
    assert_eq!(drain(&mut cursor), vec![(0, 0), (0, 1), (0, 0)]);
}

#[test]
fn test_zero_pages() {
    let file = heap_file(Arc::new(MemoryStore::new(Vec::new())));
    assert_eq!(file.page_count().unwrap(), 0);

    let mut cursor = file.scan();
    cursor.open().unwrap();
    assert!(!cursor.has_next().unwrap());
}

#[test]
fn test_malformed_store_fails_open() {
    let mut data = image(1, 1);
    data.push(0);
    let file = heap_file(Arc::new(MemoryStore::new(data)));

    let mut cursor = file.scan();
    assert_eq!(cursor.open().unwrap_err().kind(), ErrorKind::MalformedStore);
    assert!(!cursor.is_open());
}

#[test]
fn test_read_page_matches_byte_range() {
    let data = image(3, 4);
    let file = heap_file(Arc::new(MemoryStore::new(data.clone())));

    for page_no in 0..3u64 {
        let id = HeapPageId::new(TableId::new(11), page_no);
        let page = file.read_page(id).unwrap();
        let start = id.byte_offset(PAGE_SIZE).unwrap() as usize;
        assert_eq!(start, page_no as usize * PAGE_SIZE);
        // Header byte of a 4-row page.
        assert_eq!(data[start], 0b0000_1111);
        assert_eq!(page.num_used_slots(), 4);
        assert!(page.iter().all(|r| r.get(0).unwrap() == Some(&Value::int(page_no as i32))));
    }
}

#[test]
fn test_on_disk_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.dat");
    let schema = schema();
    let config = StorageConfig::with_page_size(PAGE_SIZE);

    let rows: Vec<Row> = (0..100).map(|i| row(&schema, i, i * 2)).collect();
    let pages = HeapFileEncoder::new(schema.clone(), &config)
        .unwrap()
        .write_file(rows, &path)
        .unwrap();
    assert_eq!(pages, 4);

    let file = Arc::new(HeapFile::open(&path, schema, &config).unwrap());
    assert_eq!(file.page_count().unwrap(), 4);
    let mut cursor = file.scan();
    cursor.open().unwrap();
    let scanned = drain(&mut cursor);
    assert_eq!(scanned.len(), 100);
    assert_eq!(scanned[99], (99, 198));
}

#[test]
fn test_concurrent_cursors_share_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.dat");
    std::fs::write(&path, image(6, 7)).unwrap();
    let store: Arc<dyn BackingStore> = Arc::new(FileStore::open(&path).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let file = heap_file(Arc::clone(&store));
            thread::spawn(move || {
                let mut cursor = file.scan();
                cursor.open().unwrap();
                drain(&mut cursor)
            })
        })
        .collect();

    for handle in handles {
        let rows = handle.join().unwrap();
        assert_eq!(rows.len(), 42);
        assert_eq!(rows[41], (5, 6));
    }
}
