//! Bulk loading rows into heap file images.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use tracing::debug;

use heapstone_common::config::StorageConfig;
use heapstone_common::{HeapstoneError, HeapstoneResult, Row, Schema, Value};

use crate::page::HeapPageBuilder;

/// Packs rows into consecutive full pages.
///
/// Every page except possibly the last is full, and the image length is
/// always a multiple of the page size.
#[derive(Debug, Clone)]
pub struct HeapFileEncoder {
    schema: Arc<Schema>,
    page_size: usize,
}

impl HeapFileEncoder {
    /// Creates an encoder for `schema` rows.
    pub fn new(schema: Arc<Schema>, config: &StorageConfig) -> HeapstoneResult<Self> {
        config.validate()?;
        // Fails early if a row does not fit a page.
        HeapPageBuilder::new(schema.clone(), config.page_size)?;
        Ok(Self {
            schema,
            page_size: config.page_size,
        })
    }

    /// Returns the row schema.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Encodes `rows` into a heap file image.
    pub fn encode<I>(&self, rows: I) -> HeapstoneResult<Bytes>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut out = BytesMut::new();
        let mut builder = self.page_builder()?;
        for row in rows {
            if builder.is_full() {
                let full = std::mem::replace(&mut builder, self.page_builder()?);
                out.extend_from_slice(&full.build());
            }
            builder.add_row(&row)?;
        }
        if !builder.is_empty() {
            out.extend_from_slice(&builder.build());
        }
        Ok(out.freeze())
    }

    /// Encodes `rows` and writes the image to `path`.
    ///
    /// Returns the number of pages written.
    pub fn write_file<I>(&self, rows: I, path: impl AsRef<Path>) -> HeapstoneResult<u64>
    where
        I: IntoIterator<Item = Row>,
    {
        let path = path.as_ref();
        let image = self.encode(rows)?;
        fs::write(path, &image)?;
        let pages = (image.len() / self.page_size) as u64;
        debug!(path = %path.display(), pages, "wrote heap file");
        Ok(pages)
    }

    fn page_builder(&self) -> HeapstoneResult<HeapPageBuilder> {
        HeapPageBuilder::new(self.schema.clone(), self.page_size)
    }
}

/// Parses one comma-separated line into a row of `schema`.
///
/// Surrounding whitespace is trimmed from each value.
pub fn parse_text_row(schema: &Arc<Schema>, line: &str) -> HeapstoneResult<Row> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != schema.num_fields() {
        return Err(HeapstoneError::invalid_argument(format!(
            "expected {} fields, got {} in line {line:?}",
            schema.num_fields(),
            parts.len()
        )));
    }

    let mut values = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        values.push(Value::parse(schema.field_type(i)?, part.trim())?);
    }
    Row::from_values(Arc::clone(schema), values)
}
