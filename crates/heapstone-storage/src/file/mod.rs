//! Backing byte stores for heap files.
//!
//! A heap file only needs two things from its store: the total length and
//! positioned reads. Both are synchronous; a read blocks the calling thread
//! until bytes are available or an error occurs.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           BackingStore Trait            │
//! │        (len, read_at, fill_at)          │
//! └─────────────────────────────────────────┘
//!              │                   │
//!              ▼                   ▼
//! ┌─────────────────────┐  ┌─────────────────────┐
//! │     FileStore       │  │    MemoryStore      │
//! │  (std::fs::File)    │  │   (bytes::Bytes)    │
//! └─────────────────────┘  └─────────────────────┘
//! ```

mod handle;
mod memory;
mod std_io;

pub use handle::BackingStore;
pub use memory::MemoryStore;
pub use std_io::FileStore;
