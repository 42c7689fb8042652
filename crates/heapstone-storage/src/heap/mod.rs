//! Heap files.
//!
//! A heap file is an unordered sequence of fixed-size pages over a
//! [`BackingStore`](crate::file::BackingStore). Page `n` occupies bytes
//! `[n * page_size, (n + 1) * page_size)`.
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬─────┐
//! │  page 0  │  page 1  │  page 2  │ ... │
//! └──────────┴──────────┴──────────┴─────┘
//!      ▲
//!      └── HeapFileCursor walks pages in order, slots in order
//! ```

mod cursor;
mod encoder;
mod file;

pub use cursor::HeapFileCursor;
pub use encoder::{parse_text_row, HeapFileEncoder};
pub use file::HeapFile;
