//! Decoded heap pages.

use std::sync::Arc;

use bytes::Bytes;
use tracing::trace;

use heapstone_common::{HeapPageId, HeapstoneError, HeapstoneResult, RecordId, Row, Schema};

use super::codec::decode_row;
use super::layout::PageLayout;

/// A page of one table, decoded from its raw bytes.
///
/// Rows in occupied slots are decoded eagerly and carry a [`RecordId`]
/// pointing back at `(id, slot)`.
#[derive(Debug, Clone)]
pub struct HeapPage {
    id: HeapPageId,
    layout: PageLayout,
    header: Bytes,
    rows: Vec<Option<Row>>,
}

impl HeapPage {
    /// Decodes a page image.
    ///
    /// The page size is the length of `data`.
    pub fn from_bytes(id: HeapPageId, schema: &Arc<Schema>, data: Bytes) -> HeapstoneResult<Self> {
        let layout = PageLayout::new(schema, data.len())?;
        let header = data.slice(..layout.header_size());

        let mut rows = Vec::with_capacity(layout.num_slots());
        for slot in 0..layout.num_slots() {
            if !bit_is_set(&header, slot) {
                rows.push(None);
                continue;
            }
            let record_id = RecordId::new(id, slot_number(slot, id)?);
            let row = decode_row(&data[layout.slot_range(slot)], schema, id)?;
            rows.push(Some(row.with_record_id(record_id)));
        }

        trace!(page = %id, used = rows.iter().flatten().count(), "decoded heap page");
        Ok(Self {
            id,
            layout,
            header,
            rows,
        })
    }

    /// Returns this page's identity.
    pub fn id(&self) -> HeapPageId {
        self.id
    }

    /// Returns the slot geometry.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Number of slots on the page.
    pub fn num_slots(&self) -> usize {
        self.layout.num_slots()
    }

    /// Returns true if `slot` holds a row.
    pub fn is_slot_used(&self, slot: usize) -> bool {
        slot < self.layout.num_slots() && bit_is_set(&self.header, slot)
    }

    /// Number of occupied slots.
    pub fn num_used_slots(&self) -> usize {
        self.rows.iter().flatten().count()
    }

    /// Number of free slots.
    pub fn num_empty_slots(&self) -> usize {
        self.num_slots() - self.num_used_slots()
    }

    /// Iterates the rows present, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().flatten()
    }

    /// Consumes the page, returning its rows in slot order.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows.into_iter().flatten().collect()
    }
}

#[inline]
fn bit_is_set(header: &[u8], slot: usize) -> bool {
    (header[slot / 8] >> (slot % 8)) & 1 == 1
}

fn slot_number(slot: usize, id: HeapPageId) -> HeapstoneResult<u32> {
    u32::try_from(slot).map_err(|_| HeapstoneError::corruption(id, "slot number overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HeapPageBuilder;
    use heapstone_common::{FieldType, TableId, Value};

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::unnamed(&[FieldType::Int, FieldType::Int]).unwrap())
    }

    fn row(a: i32, b: i32) -> Row {
        Row::from_values(schema(), vec![Value::int(a), Value::int(b)]).unwrap()
    }

    #[test]
    fn test_empty_page() {
        let id = HeapPageId::new(TableId::new(1), 0);
        let page = HeapPage::from_bytes(id, &schema(), Bytes::from(vec![0u8; 4096])).unwrap();
        assert_eq!(page.num_slots(), 504);
        assert_eq!(page.num_empty_slots(), 504);
        assert_eq!(page.layout().page_size(), 4096);
        assert_eq!(page.layout().num_slots(), 504);
        assert_eq!(page.iter().count(), 0);
    }

    #[test]
    fn test_rows_carry_record_ids() {
        let mut builder = HeapPageBuilder::new(schema(), 4096).unwrap();
        builder.add_row(&row(1, 10)).unwrap();
        builder.add_row(&row(2, 20)).unwrap();
        builder.add_row(&row(3, 30)).unwrap();

        let id = HeapPageId::new(TableId::new(7), 2);
        let page = HeapPage::from_bytes(id, &schema(), builder.build()).unwrap();
        assert_eq!(page.id(), id);
        assert_eq!(page.num_used_slots(), 3);
        assert!(page.is_slot_used(2));
        assert!(!page.is_slot_used(3));
        assert!(!page.is_slot_used(10_000));

        let rows = page.into_rows();
        let rendered: Vec<String> = rows.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["1\t10", "2\t20", "3\t30"]);
        assert_eq!(rows[1].record_id(), Some(RecordId::new(id, 1)));
    }

    #[test]
    fn test_sparse_slots_in_slot_order() {
        // Slots 0 and 9 occupied, everything else free.
        let schema = schema();
        let layout = PageLayout::new(&schema, 256).unwrap();
        let mut data = vec![0u8; 256];
        data[0] = 0b0000_0001;
        data[1] = 0b0000_0010;
        data[layout.slot_range(0)].copy_from_slice(&[0, 0, 0, 5, 0, 0, 0, 6]);
        data[layout.slot_range(9)].copy_from_slice(&[0, 0, 0, 7, 0, 0, 0, 8]);

        let id = HeapPageId::new(TableId::new(1), 0);
        let page = HeapPage::from_bytes(id, &schema, Bytes::from(data)).unwrap();
        let slots: Vec<u32> = page
            .iter()
            .map(|r| r.record_id().unwrap().slot())
            .collect();
        assert_eq!(slots, vec![0, 9]);
        assert_eq!(page.iter().nth(1).unwrap().to_string(), "7\t8");
    }
}
