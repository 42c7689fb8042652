//! System-wide constants for heapstone.

// =============================================================================
// Page Constants
// =============================================================================

/// Default page size in bytes (4 KB).
pub const DEFAULT_PAGE_SIZE: usize = 4 * 1024;

/// Minimum page size in bytes.
///
/// Small enough for tests to build multi-page tables cheaply.
pub const MIN_PAGE_SIZE: usize = 256;

/// Maximum page size in bytes (64 KB).
pub const MAX_PAGE_SIZE: usize = 64 * 1024;

// =============================================================================
// Field Encoding Constants
// =============================================================================

/// Encoded size of an `Int` field (big-endian `i32`).
pub const INT_FIELD_SIZE: usize = 4;

/// Maximum number of bytes stored for a `Text` field.
///
/// Longer strings are truncated when encoded.
pub const TEXT_FIELD_LEN: usize = 128;

/// Encoded size of a `Text` field: a 4-byte length prefix plus the
/// fixed-width payload.
pub const TEXT_FIELD_SIZE: usize = 4 + TEXT_FIELD_LEN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_bounds() {
        assert!(DEFAULT_PAGE_SIZE.is_power_of_two());
        assert!(MIN_PAGE_SIZE.is_power_of_two());
        assert!(MAX_PAGE_SIZE.is_power_of_two());
        assert!(MIN_PAGE_SIZE <= DEFAULT_PAGE_SIZE && DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE);
    }

    #[test]
    fn test_text_fits_in_min_page() {
        // One text row plus its header bit must fit the smallest page.
        assert!(TEXT_FIELD_SIZE + 1 < MIN_PAGE_SIZE);
    }
}
