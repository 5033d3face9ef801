//! Trace-driven shared-cache and DRAM simulator CLI.
//!
//! Replays a memory reference trace through a set-associative cache backed by
//! a banked DRAM model, then prints the cache and DRAM statistics dumps.

use clap::Parser;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use memsim_core::common::ConfigError;
use memsim_core::config::{Config, PagePolicy, ReplacementPolicy};

mod driver;
mod trace;

use driver::Driver;
use trace::TraceError;

#[derive(Parser, Debug)]
#[command(
    name = "memsim",
    author,
    version,
    about = "Shared cache and DRAM row-buffer simulator",
    long_about = "Replay a memory reference trace through a set-associative cache and a banked DRAM model.\n\nTrace lines are `<core_id> <R|W> <hex byte address>`; blank lines and `#` comments are skipped.\n\nExamples:\n  memsim --trace traces/mix.trc\n  memsim --trace traces/mix.trc --config l2.json --policy SWP --page-policy CLOSE_PAGE"
)]
struct Cli {
    /// Memory reference trace to replay.
    #[arg(short, long)]
    trace: PathBuf,

    /// JSON configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix for the cache statistics dump.
    #[arg(short, long, default_value = "L2")]
    label: String,

    /// Override the cache replacement policy (LRU, RANDOM, SWP).
    #[arg(long)]
    policy: Option<ReplacementPolicy>,

    /// Override the DRAM page policy (OPEN_PAGE, CLOSE_PAGE).
    #[arg(long)]
    page_policy: Option<PagePolicy>,
}

/// Anything that aborts a run before the statistics are printed.
#[derive(Error, Debug)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid trace: {0}")]
    Trace(#[from] TraceError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Loads the configuration, replays the trace, and prints both dumps.
fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            Config::from_json(&json)?
        }
        None => Config::default(),
    };
    if let Some(policy) = cli.policy {
        config.cache.policy = policy;
    }
    if let Some(page_policy) = cli.page_policy {
        config.dram.page_policy = page_policy;
    }

    let file = File::open(&cli.trace).map_err(|source| CliError::Read {
        path: cli.trace.clone(),
        source,
    })?;
    let refs = trace::read_trace(BufReader::new(file))?;

    let mut driver = Driver::new(&config)?;
    driver.run(&refs);
    info!(
        references = refs.len(),
        cycles = driver.cycle(),
        stall_cycles = driver.stall_cycles(),
        writebacks = driver.writebacks(),
        "trace complete"
    );

    driver.cache.stats().print(&cli.label);
    driver.dram.stats().print();
    Ok(())
}
