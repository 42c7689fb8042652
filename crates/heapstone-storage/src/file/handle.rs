//! The backing store trait.

use heapstone_common::HeapstoneResult;

/// Trait for random-access, read-only byte stores.
///
/// All reads are position-based (pread style), so one store can be shared by
/// several heap files scanning the same table, each keeping its own cursor.
pub trait BackingStore: Send + Sync {
    /// Returns the total length of the store in bytes.
    fn len(&self) -> HeapstoneResult<u64>;

    /// Returns true if the store holds no bytes.
    fn is_empty(&self) -> HeapstoneResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Reads data from the store at the specified offset.
    ///
    /// Returns the number of bytes read. May return less than the buffer
    /// size; zero means end of store.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> HeapstoneResult<usize>;

    /// Reads until `buf` is full or no more bytes can be addressed.
    ///
    /// Returns the number of bytes filled. A result smaller than
    /// `buf.len()` means the store ended first.
    fn fill_at(&self, buf: &mut [u8], offset: u64) -> HeapstoneResult<usize> {
        let mut total_read = 0;
        while total_read < buf.len() {
            let Some(position) = offset.checked_add(total_read as u64) else {
                break;
            };
            let n = self.read_at(&mut buf[total_read..], position)?;
            if n == 0 {
                break;
            }
            total_read += n;
        }
        Ok(total_read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Endless store that hands out one byte per read.
    struct TrickleStore;

    impl BackingStore for TrickleStore {
        fn len(&self) -> HeapstoneResult<u64> {
            Ok(u64::MAX)
        }

        fn read_at(&self, buf: &mut [u8], _offset: u64) -> HeapstoneResult<usize> {
            buf[0] = 0xAB;
            Ok(1)
        }
    }

    #[test]
    fn test_fill_at_loops_over_short_reads() {
        let mut buf = [0u8; 4];
        assert_eq!(TrickleStore.fill_at(&mut buf, 0).unwrap(), 4);
        assert_eq!(buf, [0xAB; 4]);
    }

    #[test]
    fn test_fill_at_stops_at_offset_overflow() {
        let mut buf = [0u8; 8];
        assert_eq!(TrickleStore.fill_at(&mut buf, u64::MAX - 2).unwrap(), 3);
    }
}
