//! Building page images.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};

use heapstone_common::{HeapstoneError, HeapstoneResult, Row, Schema};

use super::codec::encode_row;
use super::layout::PageLayout;

/// Packs rows into a single page image, filling slots in order.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use heapstone_common::{FieldType, Row, Schema, Value};
/// use heapstone_storage::page::HeapPageBuilder;
///
/// let schema = Arc::new(Schema::unnamed(&[FieldType::Int]).unwrap());
/// let mut builder = HeapPageBuilder::new(schema.clone(), 4096).unwrap();
/// builder.add_row(&Row::from_values(schema, vec![Value::int(1)]).unwrap()).unwrap();
/// assert_eq!(builder.build().len(), 4096);
/// ```
#[derive(Debug)]
pub struct HeapPageBuilder {
    schema: Arc<Schema>,
    layout: PageLayout,
    data: BytesMut,
    used: usize,
}

impl HeapPageBuilder {
    /// Creates a builder for an empty page.
    pub fn new(schema: Arc<Schema>, page_size: usize) -> HeapstoneResult<Self> {
        let layout = PageLayout::new(&schema, page_size)?;
        Ok(Self {
            schema,
            layout,
            data: BytesMut::zeroed(page_size),
            used: 0,
        })
    }

    /// Returns the slot geometry.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Number of rows added so far.
    pub fn len(&self) -> usize {
        self.used
    }

    /// Returns true if no rows have been added.
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Returns true if every slot is taken.
    pub fn is_full(&self) -> bool {
        self.used == self.layout.num_slots()
    }

    /// Writes `row` into the next free slot and returns the slot number.
    pub fn add_row(&mut self, row: &Row) -> HeapstoneResult<usize> {
        if self.is_full() {
            return Err(HeapstoneError::invalid_argument(format!(
                "page is full ({} slots)",
                self.layout.num_slots()
            )));
        }
        let slot = self.used;
        let mut encoded = Vec::with_capacity(self.layout.row_size());
        encode_row(row, &self.schema, &mut encoded)?;
        self.data[self.layout.slot_range(slot)].copy_from_slice(&encoded);
        self.data[slot / 8] |= 1 << (slot % 8);
        self.used += 1;
        Ok(slot)
    }

    /// Finishes the page image.
    pub fn build(self) -> Bytes {
        self.data.freeze()
    }
}
