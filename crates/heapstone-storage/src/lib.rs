//! # heapstone-storage
//!
//! Fixed-page heap storage for heapstone.
//!
//! A table is a single backing byte store cut into equal-sized pages. Page
//! `n` occupies bytes `[n * page_size, (n + 1) * page_size)`. This crate
//! provides:
//!
//! - **Backing stores**: positioned reads over files or in-memory buffers
//! - **Heap pages**: the occupancy-bitmap page format and its decoder
//! - **Heap files**: page addressing plus a resumable forward-only cursor
//!   over every row of a table
//! - **Bulk loading**: packing rows into page images

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Backing byte stores
pub mod file;

/// Heap page format
pub mod page;

/// Heap files, cursors and the bulk encoder
pub mod heap;

pub use file::{BackingStore, FileStore, MemoryStore};
pub use heap::{parse_text_row, HeapFile, HeapFileCursor, HeapFileEncoder};
pub use page::{HeapPage, HeapPageBuilder, PageLayout};
