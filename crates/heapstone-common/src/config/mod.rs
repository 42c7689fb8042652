//! Configuration for heapstone.
//!
//! This module provides configuration structures for the storage layer and
//! the tools built on it.

mod engine;

pub use engine::{EngineConfig, StorageConfig};
