#![warn(missing_docs)]
//! parsum CLI Library
//!
//! Command-line front end for the sum-of-squares benchmark. Parses flags,
//! layers them over `parsum.toml`, runs the selected variants and prints the
//! report.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     parsum_cli::run()
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{
    ExecutionConfig, ExecutionError, Executor, MAX_RUNS, VariantExecution, VariantStatistics,
    build_report, build_report_meta, compute_statistics, format_human_output, num_cpus,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use parsum_core::{PartitionError, Range, partition};
use parsum_report::{OutputFormat, generate_json_report};
use rayon::ThreadPoolBuilder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// parsum CLI arguments
///
/// Every workload and output flag is optional so that `parsum.toml` values
/// apply unless the flag is given.
#[derive(Parser, Debug)]
#[command(name = "parsum")]
#[command(
    author,
    version,
    about = "parsum - single- vs multi-threaded sum-of-squares benchmark"
)]
pub struct Cli {
    /// Optional subcommand (Run, Plan, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Sum the squares of every integer in [1, N]
    #[arg(short, long, global = true)]
    pub n: Option<u64>,

    /// Threads in the multi-threaded variant
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Which variants to run
    #[arg(long, value_enum, global = true)]
    pub variant: Option<VariantSelection>,

    /// Measured runs per variant
    #[arg(short, long, global = true)]
    pub runs: Option<usize>,

    /// Unmeasured runs per variant before measuring
    #[arg(long, global = true)]
    pub warmup_runs: Option<usize>,

    /// Output format: human, json
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Configuration file (default: discover parsum.toml upwards)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of threads for parallel statistics computation
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j', default_value = "0", global = true)]
    pub threads: usize,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the benchmark (default)
    Run,
    /// Print how [1, N] is split across workers without running
    Plan,
    /// Print a default parsum.toml
    Init,
}

/// Effective settings after layering CLI flags over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Upper bound of `[1, n]`
    pub n: u64,
    /// Threads in the multi-threaded variant
    pub workers: usize,
    /// Which variants run
    pub variant: VariantSelection,
    /// Measured runs per variant
    pub runs: usize,
    /// Unmeasured runs per variant
    pub warmup_runs: usize,
    /// Report format
    pub format: OutputFormat,
    /// Report destination (stdout when `None`)
    pub output: Option<PathBuf>,
}

/// Run the parsum CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error for invalid configuration or a
/// failed run.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the parsum CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    if cli.command == Some(Commands::Init) {
        print!("{}", ParsumConfig::default_toml());
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let settings = resolve_settings(&cli, &config)?;

    match cli.command {
        Some(Commands::Plan) => {
            print!("{}", format_plan(settings.n, settings.workers)?);
        }
        Some(Commands::Run) | None => {
            run_benchmark(&settings, cli.threads)?;
        }
        Some(Commands::Init) => {}
    }

    Ok(())
}

/// Install the stderr tracing subscriber; `RUST_LOG` overrides the default
fn init_logging(verbose: bool) {
    let default = if verbose { "parsum=debug" } else { "parsum=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded in a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<ParsumConfig> {
    if let Some(path) = explicit {
        let config = ParsumConfig::load(path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        return Ok(config);
    }

    match ParsumConfig::discover()? {
        Some((path, config)) => {
            tracing::debug!(path = %path.display(), "discovered configuration");
            Ok(config)
        }
        None => Ok(ParsumConfig::default()),
    }
}

/// Layer CLI flags over `config` and validate the result
pub fn resolve_settings(cli: &Cli, config: &ParsumConfig) -> anyhow::Result<Settings> {
    let n = cli.n.unwrap_or(config.workload.n);
    let workers = cli.workers.unwrap_or(config.workload.workers);
    let variant = cli.variant.unwrap_or(config.runner.variant);
    let runs = cli.runs.unwrap_or(config.runner.runs);
    let warmup_runs = cli.warmup_runs.unwrap_or(config.runner.warmup_runs);

    let format_name = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_name.parse().map_err(anyhow::Error::msg)?;

    Range::full(n).context("invalid problem size")?;
    if variant != VariantSelection::Single && workers == 0 {
        return Err(anyhow::Error::new(PartitionError::NoWorkers).context("invalid worker count"));
    }
    if runs == 0 {
        anyhow::bail!("runs must be at least 1");
    }
    match warmup_runs.checked_add(runs) {
        Some(total) if total <= MAX_RUNS => {}
        _ => anyhow::bail!(
            "runs ({}) plus warmup runs ({}) must not exceed {}",
            runs,
            warmup_runs,
            MAX_RUNS
        ),
    }

    Ok(Settings {
        n,
        workers,
        variant,
        runs,
        warmup_runs,
        format,
        output: cli.output.clone().or_else(|| config.output.path.clone()),
    })
}

/// Render the partition of `[1, n]` as a tree
///
/// Workers beyond `n` get no range and are summarized on one line.
pub fn format_plan(n: u64, workers: usize) -> Result<String, PartitionError> {
    let ranges = partition(n, workers)?;
    let idle = workers - ranges.len();

    let mut output = format!("parsum plan: [1, {}] across {} worker(s)\n", n, workers);
    for (index, range) in ranges.iter().enumerate() {
        let branch = if index + 1 == ranges.len() && idle == 0 {
            "└──"
        } else {
            "├──"
        };
        output.push_str(&format!(
            "{} parsum-worker-{}: {} ({} elements)\n",
            branch,
            index,
            range,
            range.len()
        ));
    }
    if idle > 0 {
        output.push_str(&format!("└── {} idle worker(s)\n", idle));
    }

    Ok(output)
}

fn run_benchmark(settings: &Settings, threads: usize) -> anyhow::Result<()> {
    // Configure Rayon thread pool for statistics computation
    if threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    let exec_config = ExecutionConfig {
        n: settings.n,
        variants: settings.variant.variants(settings.workers),
        runs: settings.runs,
        warmup_runs: settings.warmup_runs,
        show_progress: settings.format == OutputFormat::Human && settings.runs > 1,
    };

    tracing::info!(
        n = settings.n,
        workers = settings.workers,
        runs = settings.runs,
        warmup_runs = settings.warmup_runs,
        cpu_cores = num_cpus(),
        "starting benchmark"
    );

    let executions = Executor::new(exec_config.clone()).execute()?;
    let stats = compute_statistics(&executions);
    let report = build_report(&exec_config, settings.workers, &executions, &stats);

    if let Some(comparison) = &report.comparison {
        if !comparison.parity.passed() {
            tracing::warn!(
                int_match = comparison.parity.int_match,
                float_relative_diff = comparison.parity.float_relative_diff,
                float_tolerance = comparison.parity.float_tolerance,
                "variants disagree on the sums"
            );
        }
    }

    let output = match settings.format {
        OutputFormat::Json => {
            let mut json = generate_json_report(&report)?;
            json.push('\n');
            json
        }
        OutputFormat::Human => format_human_output(&report),
    };

    if let Some(path) = &settings.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        tracing::info!(path = %path.display(), "report written");
    } else {
        print!("{}", output);
    }

    Ok(())
}
