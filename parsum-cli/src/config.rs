//! Configuration loading from parsum.toml
//!
//! Settings can live in a `parsum.toml` next to where the benchmark runs.
//! The file is discovered by walking up from the current directory, or given
//! explicitly with `--config`. Command-line flags override file values.

use parsum_core::{DEFAULT_N, DEFAULT_WORKERS, Variant};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up during discovery
pub const CONFIG_FILE_NAME: &str = "parsum.toml";

/// parsum configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParsumConfig {
    /// Problem size and worker count
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// Which variants run and how often
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which variants to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VariantSelection {
    /// Single-threaded baseline only
    Single,
    /// Multi-threaded variant only
    Multi,
    /// Baseline first, then the multi-threaded variant
    #[default]
    Both,
}

impl VariantSelection {
    /// Variants to execute, in order
    pub fn variants(self, workers: usize) -> Vec<Variant> {
        match self {
            VariantSelection::Single => vec![Variant::SingleThreaded],
            VariantSelection::Multi => vec![Variant::MultiThreaded { workers }],
            VariantSelection::Both => vec![
                Variant::SingleThreaded,
                Variant::MultiThreaded { workers },
            ],
        }
    }
}

/// Problem size and worker count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Upper bound of `[1, n]`
    #[serde(default = "default_n")]
    pub n: u64,
    /// Threads in the multi-threaded variant
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            n: default_n(),
            workers: default_workers(),
        }
    }
}

fn default_n() -> u64 {
    DEFAULT_N
}
fn default_workers() -> usize {
    DEFAULT_WORKERS
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// "single", "multi" or "both"
    #[serde(default)]
    pub variant: VariantSelection,
    /// Measured runs per variant
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Unmeasured runs per variant before measuring
    #[serde(default)]
    pub warmup_runs: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            variant: VariantSelection::default(),
            runs: default_runs(),
            warmup_runs: 0,
        }
    }
}

fn default_runs() -> usize {
    1
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Write the report here instead of stdout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl ParsumConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Walk up from `start` looking for `parsum.toml`
    pub fn discover_from(start: impl AsRef<Path>) -> anyhow::Result<Option<(PathBuf, Self)>> {
        let mut dir = start.as_ref().to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                let config = Self::load(&config_path)?;
                return Ok(Some((config_path, config)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Walk up from the current directory looking for `parsum.toml`
    pub fn discover() -> anyhow::Result<Option<(PathBuf, Self)>> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(cwd)
    }

    /// Default configuration as a commented TOML document
    pub fn default_toml() -> String {
        format!(
            r#"# parsum configuration

[workload]
# Sum the squares of every integer in [1, n]
n = {DEFAULT_N}
# Threads in the multi-threaded variant
workers = {DEFAULT_WORKERS}

[runner]
# "single", "multi" or "both"
variant = "both"
# Measured runs per variant
runs = 1
# Unmeasured runs per variant before measuring
warmup_runs = 0

[output]
# "human" or "json"
format = "human"
# Write the report to a file instead of stdout (uncomment to enable)
# path = "target/parsum/report.json"
"#
        )
    }
}
