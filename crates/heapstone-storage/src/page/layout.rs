//! Slot geometry for a schema and page size.

use heapstone_common::{HeapstoneError, HeapstoneResult, Schema};

/// Slot geometry of a heap page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    page_size: usize,
    row_size: usize,
    num_slots: usize,
    header_size: usize,
}

impl PageLayout {
    /// Computes the layout of `schema` rows on pages of `page_size` bytes.
    ///
    /// Fails with `InvalidArgument` if not even one row fits.
    pub fn new(schema: &Schema, page_size: usize) -> HeapstoneResult<Self> {
        let row_size = schema.byte_size();
        let num_slots = (page_size * 8) / (row_size * 8 + 1);
        if num_slots == 0 {
            return Err(HeapstoneError::invalid_argument(format!(
                "rows of {row_size} bytes do not fit in a {page_size}-byte page"
            )));
        }
        Ok(Self {
            page_size,
            row_size,
            num_slots,
            header_size: num_slots.div_ceil(8),
        })
    }

    /// Page size in bytes.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Encoded row width in bytes.
    #[inline]
    pub fn row_size(&self) -> usize {
        self.row_size
    }

    /// Number of row slots per page.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Bitmap header size in bytes.
    #[inline]
    pub fn header_size(&self) -> usize {
        self.header_size
    }

    /// Byte range of `slot` within the page.
    #[inline]
    pub fn slot_range(&self, slot: usize) -> std::ops::Range<usize> {
        let start = self.header_size + slot * self.row_size;
        start..start + self.row_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapstone_common::FieldType;

    #[test]
    fn test_two_int_layout() {
        // 8-byte rows: 4096 * 8 / 65 = 504 slots, 63 header bytes.
        let schema = Schema::unnamed(&[FieldType::Int, FieldType::Int]).unwrap();
        let layout = PageLayout::new(&schema, 4096).unwrap();
        assert_eq!(layout.num_slots(), 504);
        assert_eq!(layout.header_size(), 63);
        assert!(layout.header_size() + layout.num_slots() * layout.row_size() <= 4096);
    }

    #[test]
    fn test_slot_range() {
        let schema = Schema::unnamed(&[FieldType::Int]).unwrap();
        let layout = PageLayout::new(&schema, 256).unwrap();
        // 256 * 8 / 33 = 62 slots, 8 header bytes.
        assert_eq!(layout.num_slots(), 62);
        assert_eq!(layout.slot_range(0), 8..12);
        assert_eq!(layout.slot_range(2), 16..20);
    }

    #[test]
    fn test_row_too_wide() {
        let types = vec![FieldType::Text; 4];
        let schema = Schema::unnamed(&types).unwrap();
        assert!(PageLayout::new(&schema, 256).is_err());
    }
}
