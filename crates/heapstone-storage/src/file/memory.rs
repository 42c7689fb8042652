//! In-memory backing store.

use bytes::Bytes;

use heapstone_common::HeapstoneResult;

use super::handle::BackingStore;

/// A read-only store over an immutable byte buffer.
///
/// Cloning is cheap; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Bytes,
}

impl MemoryStore {
    /// Creates a store over `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Returns the underlying bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }
}

impl BackingStore for MemoryStore {
    fn len(&self) -> HeapstoneResult<u64> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&self, buf: &mut [u8], offset: u64) -> HeapstoneResult<usize> {
        let start = match usize::try_from(offset) {
            Ok(start) if start < self.data.len() => start,
            _ => return Ok(0),
        };
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_at() {
        let store = MemoryStore::new(b"Hello, World!".to_vec());
        assert_eq!(store.len().unwrap(), 13);

        let mut buf = [0u8; 5];
        assert_eq!(store.read_at(&mut buf, 7).unwrap(), 5);
        assert_eq!(&buf, b"World");
    }

    #[test]
    fn test_fill_at_stops_at_end() {
        let store = MemoryStore::new(vec![1u8; 10]);
        let mut buf = [0u8; 8];
        assert_eq!(store.fill_at(&mut buf, 6).unwrap(), 4);
        assert_eq!(store.fill_at(&mut buf, 100).unwrap(), 0);
    }

    #[test]
    fn test_fill_at_near_end_of_address_space() {
        let store = MemoryStore::new(vec![1u8; 10]);
        let mut buf = [0u8; 8];
        assert_eq!(store.fill_at(&mut buf, u64::MAX - 2).unwrap(), 0);
        assert_eq!(store.bytes().len(), 10);
    }

    #[test]
    fn test_empty() {
        let store = MemoryStore::default();
        assert!(store.is_empty().unwrap());
    }
}
