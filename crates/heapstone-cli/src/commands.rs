//! Subcommand implementations.
//!
//! Each command writes its rows to `out`, one per line, tab separated.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use heapstone_common::config::EngineConfig;
use heapstone_common::{FieldType, Row, Schema};
use heapstone_exec::{
    AggregateExec, AggregateFunc, CmpOp, FieldPredicate, NestedLoopJoinExec, Operator,
    SeqScanExec,
};
use heapstone_storage::{parse_text_row, HeapFile, HeapFileEncoder};

/// Converts comma-separated text lines into a heap file.
///
/// Blank lines are skipped. Returns the number of pages written.
pub fn convert(
    config: &EngineConfig,
    input: &Path,
    output: &Path,
    types: &[FieldType],
) -> Result<u64> {
    let schema = Arc::new(Schema::unnamed(types)?);
    let reader = BufReader::new(
        File::open(input).with_context(|| format!("failed to open {}", input.display()))?,
    );

    let mut rows = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_text_row(&schema, &line)
            .with_context(|| format!("{}:{}", input.display(), n + 1))?;
        rows.push(row);
    }

    let count = rows.len();
    let pages = HeapFileEncoder::new(schema, &config.storage)?.write_file(rows, output)?;
    info!(rows = count, pages, output = %output.display(), "converted");
    Ok(pages)
}

/// Prints every row of a heap file.
pub fn scan(
    config: &EngineConfig,
    file: &Path,
    types: &[FieldType],
    out: &mut dyn Write,
) -> Result<()> {
    let mut scan = SeqScanExec::new(&open_table(config, file, types)?);
    drain(&mut scan, out)
}

/// Prints one aggregate row per group.
pub fn aggregate(
    config: &EngineConfig,
    file: &Path,
    types: &[FieldType],
    func: AggregateFunc,
    field: usize,
    group_by: Option<usize>,
    out: &mut dyn Write,
) -> Result<()> {
    let scan = SeqScanExec::new(&open_table(config, file, types)?);
    let mut agg = AggregateExec::new(Box::new(scan), field, group_by, func)?;
    drain(&mut agg, out)
}

/// Join inputs: one heap file and the field compared on it.
pub struct JoinSide<'a> {
    /// Heap file path.
    pub file: &'a Path,
    /// Field types of the file.
    pub types: &'a [FieldType],
    /// Compared field position.
    pub field: usize,
}

/// Prints the rows of `left ⋈ right` on `left.field <op> right.field`.
pub fn join(
    config: &EngineConfig,
    left: JoinSide<'_>,
    right: JoinSide<'_>,
    op: CmpOp,
    out: &mut dyn Write,
) -> Result<()> {
    let outer = SeqScanExec::new(&open_table(config, left.file, left.types)?);
    let inner = SeqScanExec::new(&open_table(config, right.file, right.types)?);
    let mut join = NestedLoopJoinExec::new(
        Box::new(FieldPredicate::new(left.field, op, right.field)),
        Box::new(outer),
        Box::new(inner),
    );
    drain(&mut join, out)
}

fn open_table(config: &EngineConfig, path: &Path, types: &[FieldType]) -> Result<Arc<HeapFile>> {
    let schema = Arc::new(Schema::unnamed(types)?);
    let file = HeapFile::open(path, schema, &config.storage)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Arc::new(file))
}

fn drain(op: &mut dyn Operator, out: &mut dyn Write) -> Result<()> {
    op.open()?;
    let result = write_rows(op, out);
    op.close();
    result
}

fn write_rows(op: &mut dyn Operator, out: &mut dyn Write) -> Result<()> {
    let mut count = 0usize;
    while op.has_next()? {
        let row: Row = op.next()?;
        writeln!(out, "{row}")?;
        count += 1;
    }
    out.flush()?;
    info!(rows = count, "done");
    Ok(())
}
