//! Heap page format.
//!
//! Every row of a table has the same encoded width, so a page is an
//! occupancy bitmap followed by an array of fixed-width slots:
//!
//! ```text
//! +----------------------+
//! |   Occupancy Bitmap   |  ceil(num_slots / 8) bytes
//! |  bit i = slot i used |  byte i / 8, bit i % 8 (LSB first)
//! +----------------------+
//! |      [slot 0]        |  row_size bytes each
//! |      [slot 1]        |
//! |        ...           |
//! +----------------------+
//! |   Zero Padding       |
//! +----------------------+
//! ```
//!
//! `num_slots = floor(page_size * 8 / (row_size * 8 + 1))`: each slot costs
//! its row bytes plus one header bit.
//!
//! Field encodings inside a slot: `Int` is a big-endian `i32`; `Text` is a
//! big-endian `i32` length followed by a fixed 128-byte payload.

mod builder;
mod codec;
mod heap_page;
mod layout;

pub use builder::HeapPageBuilder;
pub use heap_page::HeapPage;
pub use layout::PageLayout;
