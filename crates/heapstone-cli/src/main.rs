//! heapstone command-line interface
//!
//! Builds heap files from text and runs scans, joins and aggregates over
//! them.
//!
//! # Usage
//!
//! ```bash
//! # Convert comma-separated text into a heap file
//! heapstone convert people.txt people.dat --types int,text
//!
//! # Print every row
//! heapstone scan people.dat --types int,text
//!
//! # Sum field 1 grouped by field 0
//! heapstone aggregate sales.dat --types text,int --func sum --field 1 --group-by 0
//!
//! # Equi-join two files
//! heapstone join a.dat b.dat --left-types int --right-types int,text \
//!     --left-field 0 --right-field 0
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use heapstone_common::FieldType;
use heapstone_exec::{AggregateFunc, CmpOp};

mod commands;
mod config;

use commands::JoinSide;

/// heapstone command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "heapstone",
    version,
    about = "Build and query heapstone heap files",
    long_about = "Build heap files from comma-separated text and run sequential scans,\n\
                  nested-loop joins and grouped aggregates over them."
)]
struct Args {
    /// Configuration file path
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Page size in bytes, overriding the configuration file
    #[arg(long, env = "HEAPSTONE_PAGE_SIZE", global = true)]
    page_size: Option<usize>,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert comma-separated text lines into a heap file
    Convert {
        /// Text input, one row per line
        input: PathBuf,
        /// Heap file to write
        output: PathBuf,
        /// Field types, e.g. int,text
        #[arg(long, value_delimiter = ',', required = true)]
        types: Vec<FieldType>,
    },
    /// Print every row of a heap file
    Scan {
        /// Heap file
        file: PathBuf,
        /// Field types
        #[arg(long, value_delimiter = ',', required = true)]
        types: Vec<FieldType>,
    },
    /// Aggregate one field, optionally grouped by another
    Aggregate {
        /// Heap file
        file: PathBuf,
        /// Field types
        #[arg(long, value_delimiter = ',', required = true)]
        types: Vec<FieldType>,
        /// Aggregate function: min, max, sum, avg, count, sum_count, sc_avg
        #[arg(long)]
        func: AggregateFunc,
        /// Aggregated field position
        #[arg(long)]
        field: usize,
        /// Grouping field position
        #[arg(long)]
        group_by: Option<usize>,
    },
    /// Nested-loop join of two heap files on a field comparison
    Join {
        /// Outer heap file
        left: PathBuf,
        /// Inner heap file
        right: PathBuf,
        /// Field types of the outer file
        #[arg(long, value_delimiter = ',', required = true)]
        left_types: Vec<FieldType>,
        /// Field types of the inner file
        #[arg(long, value_delimiter = ',', required = true)]
        right_types: Vec<FieldType>,
        /// Compared field of the outer file
        #[arg(long)]
        left_field: usize,
        /// Compared field of the inner file
        #[arg(long)]
        right_field: usize,
        /// Comparison: eq, ne, lt, le, gt, ge
        #[arg(long, default_value = "eq")]
        op: CmpOp,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let config = config::load_config(args.config.as_deref(), args.page_size)?;
    init_logging(&config::log_filter(
        std::env::var(config::LOG_ENV).ok(),
        args.verbose,
        &config,
    ))?;
    debug!(page_size = config.storage.page_size, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Convert {
            input,
            output,
            types,
        } => {
            let pages = commands::convert(&config, input, output, types)?;
            eprintln!("wrote {pages} pages to {}", output.display());
            Ok(())
        }
        Command::Scan { file, types } => commands::scan(&config, file, types, &mut out),
        Command::Aggregate {
            file,
            types,
            func,
            field,
            group_by,
        } => commands::aggregate(&config, file, types, *func, *field, *group_by, &mut out),
        Command::Join {
            left,
            right,
            left_types,
            right_types,
            left_field,
            right_field,
            op,
        } => commands::join(
            &config,
            JoinSide {
                file: left,
                types: left_types,
                field: *left_field,
            },
            JoinSide {
                file: right,
                types: right_types,
                field: *right_field,
            },
            *op,
            &mut out,
        ),
    }
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
    Ok(())
}
