//! Sequential scan over a heap file.

use std::sync::Arc;

use heapstone_common::{HeapstoneResult, Row, Schema};
use heapstone_storage::{HeapFile, HeapFileCursor};

use crate::operator::Operator;

/// Sequential scan operator that reads every row of a heap file.
#[derive(Debug)]
pub struct SeqScanExec {
    /// Output schema.
    schema: Arc<Schema>,
    /// Page cursor.
    cursor: HeapFileCursor,
}

impl SeqScanExec {
    /// Creates a new sequential scan operator.
    pub fn new(file: &Arc<HeapFile>) -> Self {
        Self {
            schema: file.schema().clone(),
            cursor: file.scan(),
        }
    }

    /// Returns the file being scanned.
    pub fn file(&self) -> &Arc<HeapFile> {
        self.cursor.file()
    }
}

impl Operator for SeqScanExec {
    fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }

    fn open(&mut self) -> HeapstoneResult<()> {
        self.cursor.open()
    }

    fn has_next(&mut self) -> HeapstoneResult<bool> {
        self.cursor.has_next()
    }

    fn next(&mut self) -> HeapstoneResult<Row> {
        self.cursor.next()
    }

    fn rewind(&mut self) -> HeapstoneResult<()> {
        self.cursor.rewind()
    }

    fn close(&mut self) {
        self.cursor.close();
    }
}
