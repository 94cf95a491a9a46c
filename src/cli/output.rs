use std::path::{Path, PathBuf};

use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::batch::{Reporter, RunSummary, WriteMode};
use crate::cli::diff::simple_diff;
use crate::error::{NarrateError, Result};

/// Output format for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Progress lines and a final count (default)
    #[default]
    Human,
    /// A single pretty-printed JSON summary
    Json,
}

impl OutputFormat {
    /// Parse the config file spelling (`human` / `json`).
    pub fn from_config(value: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(value, true)
            .map_err(|_| NarrateError::Config(format!("unknown output format: {value}")))
    }
}

/// Console reporter: one line per converted file, errors on stderr.
#[derive(Debug)]
pub struct HumanReporter {
    mode: WriteMode,
    show_diff: bool,
}

impl HumanReporter {
    #[must_use]
    pub const fn new(mode: WriteMode, show_diff: bool) -> Self {
        Self { mode, show_diff }
    }
}

impl Reporter for HumanReporter {
    fn discovered(&mut self, count: usize) {
        println!("Found {count} Markdown files");
    }

    fn converted(&mut self, path: &Path, original: &str, converted: &str) {
        match self.mode {
            WriteMode::Write => println!("{} {}", style("Converted:").green(), path.display()),
            WriteMode::Check => println!("{} {}", style("Would convert:").yellow(), path.display()),
        }
        if self.show_diff {
            println!("--- {}", path.display());
            println!("+++ narrative");
            print!("{}", simple_diff(original, converted));
        }
    }

    fn failed(&mut self, path: &Path, error: &NarrateError) {
        eprintln!(
            "{} {}: {error}",
            style("Error processing").red().for_stderr(),
            path.display()
        );
    }

    fn finished(&mut self, summary: &RunSummary) {
        println!();
        match self.mode {
            WriteMode::Write => println!("Converted {} files", summary.converted_count()),
            WriteMode::Check => {
                println!("{} files would be converted", summary.converted_count());
            }
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    root: &'a Path,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

#[derive(Serialize)]
struct JsonRootMissing {
    version: &'static str,
    root: PathBuf,
    error: String,
}

pub fn print_json_summary(root: &Path, summary: &RunSummary) -> Result<()> {
    let report = JsonReport {
        version: crate::VERSION,
        root,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Report a missing documents root. Not an error for the run.
pub fn print_root_missing(format: OutputFormat, err: &NarrateError, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{err}"),
        OutputFormat::Json => {
            let report = JsonRootMissing {
                version: crate::VERSION,
                root: root.to_path_buf(),
                error: err.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
