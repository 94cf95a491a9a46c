//! Recursive document discovery.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{NarrateError, Result};

/// A directory entry that could not be read during discovery.
#[derive(Debug)]
pub struct SkippedEntry {
    pub path: Option<PathBuf>,
    pub error: NarrateError,
}

/// Files found under a root, in stable file-name order.
#[derive(Debug, Default)]
pub struct Discovery {
    pub documents: Vec<PathBuf>,
    pub skipped: Vec<SkippedEntry>,
}

/// Walk `root` for files whose extension is one of `extensions`.
///
/// Unreadable entries are collected in [`Discovery::skipped`] rather than
/// failing the walk. A missing root is an error.
pub fn discover_documents(
    root: &Path,
    extensions: &[String],
    follow_links: bool,
) -> Result<Discovery> {
    if !root.is_dir() {
        return Err(NarrateError::RootNotFound(root.to_path_buf()));
    }

    let mut discovery = Discovery::default();
    for entry in WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf);
                warn!(path = ?path, error = %err, "skipping unreadable entry");
                discovery.skipped.push(SkippedEntry {
                    path,
                    error: err.into(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if has_extension(entry.path(), extensions) {
            discovery.documents.push(entry.into_path());
        }
    }

    debug!(
        root = %root.display(),
        documents = discovery.documents.len(),
        skipped = discovery.skipped.len(),
        "discovery finished"
    );
    Ok(discovery)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}
