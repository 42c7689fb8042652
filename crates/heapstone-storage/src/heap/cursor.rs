//! Forward cursor over a heap file.

use std::sync::Arc;
use std::vec;

use tracing::{debug, trace};

use heapstone_common::{HeapPageId, HeapstoneError, HeapstoneResult, Row};

use super::file::HeapFile;

const NAME: &str = "HeapFileCursor";

/// Position of an open cursor.
#[derive(Debug)]
struct CursorPosition {
    /// Next page to read.
    next_page: u64,
    /// Page count captured at open or rewind.
    page_count: u64,
    /// Remaining rows of the current page.
    rows: vec::IntoIter<Row>,
}

/// Yields every row of a heap file, page-ascending then slot-ascending.
///
/// A cursor starts closed. Each page is read once per pass; `rewind`
/// restarts from page 0.
#[derive(Debug)]
pub struct HeapFileCursor {
    file: Arc<HeapFile>,
    position: Option<CursorPosition>,
}

impl HeapFileCursor {
    pub(crate) fn new(file: Arc<HeapFile>) -> Self {
        Self {
            file,
            position: None,
        }
    }

    /// Returns the file being scanned.
    pub fn file(&self) -> &Arc<HeapFile> {
        &self.file
    }

    /// Returns true between `open` and `close`.
    pub fn is_open(&self) -> bool {
        self.position.is_some()
    }

    /// Positions the cursor before the first row.
    pub fn open(&mut self) -> HeapstoneResult<()> {
        if self.position.is_some() {
            return Err(HeapstoneError::already_open(NAME));
        }
        let position = self.start()?;
        debug!(
            table = %self.file.table_id(),
            pages = position.page_count,
            "opened heap cursor"
        );
        self.position = Some(position);
        Ok(())
    }

    /// Returns true if `next` would yield a row.
    pub fn has_next(&mut self) -> HeapstoneResult<bool> {
        let position = self
            .position
            .as_mut()
            .ok_or_else(|| HeapstoneError::not_open(NAME, "has_next"))?;
        fill(&self.file, position)
    }

    /// Returns the next row.
    pub fn next(&mut self) -> HeapstoneResult<Row> {
        let position = self
            .position
            .as_mut()
            .ok_or_else(|| HeapstoneError::not_open(NAME, "next"))?;
        if !fill(&self.file, position)? {
            return Err(HeapstoneError::NoMoreRows { operator: NAME });
        }
        position
            .rows
            .next()
            .ok_or(HeapstoneError::NoMoreRows { operator: NAME })
    }

    /// Restarts the scan from page 0.
    pub fn rewind(&mut self) -> HeapstoneResult<()> {
        if self.position.is_none() {
            return Err(HeapstoneError::not_open(NAME, "rewind"));
        }
        self.position = Some(self.start()?);
        Ok(())
    }

    /// Releases the current page.
    pub fn close(&mut self) {
        self.position = None;
    }

    fn start(&self) -> HeapstoneResult<CursorPosition> {
        Ok(CursorPosition {
            next_page: 0,
            page_count: self.file.page_count()?,
            rows: Vec::new().into_iter(),
        })
    }
}

/// Reads pages until a row is buffered or the file is exhausted.
fn fill(file: &HeapFile, position: &mut CursorPosition) -> HeapstoneResult<bool> {
    while position.rows.as_slice().is_empty() {
        if position.next_page >= position.page_count {
            return Ok(false);
        }
        let page_id = HeapPageId::new(file.table_id(), position.next_page);
        let page = file.read_page(page_id)?;
        position.next_page += 1;
        trace!(page = %page_id, rows = page.num_used_slots(), "advanced to page");
        position.rows = page.into_rows().into_iter();
    }
    Ok(true)
}
