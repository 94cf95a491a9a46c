//! Batch conversion of documents on disk.
//!
//! Files are processed one at a time: read, convert in memory, compare, and
//! overwrite only when the content changed. A failure on one file is
//! reported and the run moves on to the next.

mod discover;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{NarrateError, Result};
use crate::narrative::Converter;

pub use discover::{Discovery, SkippedEntry, discover_documents};

/// What to do with a document whose content would change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Overwrite the file in place.
    #[default]
    Write,
    /// Report only.
    Check,
}

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Converted {
        original: String,
        converted: String,
        lists: usize,
    },
    Unchanged,
}

/// A per-file failure.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub mode: WriteMode,
    pub discovered: usize,
    pub converted: Vec<PathBuf>,
    pub unchanged: usize,
    pub failed: Vec<FileFailure>,
}

impl RunSummary {
    #[must_use]
    pub fn converted_count(&self) -> usize {
        self.converted.len()
    }
}

/// Observer of a batch run. All methods default to doing nothing.
pub trait Reporter {
    fn discovered(&mut self, _count: usize) {}
    fn converted(&mut self, _path: &Path, _original: &str, _converted: &str) {}
    fn failed(&mut self, _path: &Path, _error: &NarrateError) {}
    fn finished(&mut self, _summary: &RunSummary) {}
}

/// Reporter that records nothing.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Read, convert, and (in [`WriteMode::Write`]) rewrite a single file.
///
/// The file is written only after the whole converted content is ready, and
/// only when it differs from what was read.
pub fn process_file(path: &Path, converter: &Converter, mode: WriteMode) -> Result<FileOutcome> {
    let original = std::fs::read_to_string(path).map_err(|source| NarrateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let conversion = converter.convert(&original);
    if conversion.output == original {
        debug!(path = %path.display(), "unchanged");
        return Ok(FileOutcome::Unchanged);
    }

    if mode == WriteMode::Write {
        std::fs::write(path, &conversion.output).map_err(|source| NarrateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    debug!(path = %path.display(), lists = conversion.rewritten, ?mode, "converted");

    Ok(FileOutcome::Converted {
        original,
        converted: conversion.output,
        lists: conversion.rewritten,
    })
}

/// Process every discovered document in order, isolating per-file failures.
///
/// Entries skipped during discovery are reported as failures first.
pub fn run<R: Reporter + ?Sized>(
    discovery: Discovery,
    converter: &Converter,
    mode: WriteMode,
    reporter: &mut R,
) -> RunSummary {
    let mut summary = RunSummary {
        mode,
        discovered: discovery.documents.len(),
        ..RunSummary::default()
    };
    reporter.discovered(summary.discovered);

    for skipped in discovery.skipped {
        let path = skipped.path.unwrap_or_default();
        reporter.failed(&path, &skipped.error);
        summary.failed.push(FileFailure {
            path,
            error: skipped.error.to_string(),
        });
    }

    for path in discovery.documents {
        match process_file(&path, converter, mode) {
            Ok(FileOutcome::Converted {
                original, converted, ..
            }) => {
                reporter.converted(&path, &original, &converted);
                summary.converted.push(path);
            }
            Ok(FileOutcome::Unchanged) => summary.unchanged += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file");
                reporter.failed(&path, &err);
                summary.failed.push(FileFailure {
                    path,
                    error: err.to_string(),
                });
            }
        }
    }

    info!(
        discovered = summary.discovered,
        converted = summary.converted_count(),
        failed = summary.failed.len(),
        "run finished"
    );
    reporter.finished(&summary);
    summary
}
