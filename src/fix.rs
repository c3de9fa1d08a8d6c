//! Fixing a file in place
//!
//! Ties the pieces together: read the file (or a git snapshot of it), rewrite
//! it, verify the result, and decide whether it may be written.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::check::{Leftover, find_leftovers};
use crate::error::{Error, Result};
use crate::git::GitSnapshot;
use crate::rewrite::{LazyImport, RewriteConfig, rewrite};
use crate::source::{read_source, write_source};

/// Where the original text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputSource {
    #[default]
    WorkingTree,
    /// A git revision, resolved like `git rev-parse`
    Revision(String),
}

/// What to do with the rewritten text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Write,
    /// Report only
    DryRun,
    /// Hand the text back to the caller instead of writing it
    Stdout,
}

/// Options for fixing one file.
#[derive(Debug, Clone, Default)]
pub struct FixOptions {
    pub path: PathBuf,
    pub input: InputSource,
    /// Destination, defaults to `path`
    pub output: Option<PathBuf>,
    pub mode: WriteMode,
    /// Write even if lazy loader calls survived the rewrite
    pub force: bool,
    pub rewrite: RewriteConfig,
}

impl FixOptions {
    pub fn destination(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.path)
    }
}

/// Summary of what happened to a file.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteReport {
    pub path: PathBuf,
    pub source: InputSource,
    pub output: PathBuf,
    pub loader: String,
    pub converted: Vec<LazyImport>,
    pub duplicates_removed: Vec<usize>,
    pub loader_import_pruned: bool,
    pub leftovers: Vec<Leftover>,
    pub written: bool,
    /// Write skipped because of leftovers and no `force`
    #[serde(skip)]
    pub blocked: bool,
}

impl RewriteReport {
    /// Turn a blocked write into an error.
    pub fn ensure_written(&self) -> Result<()> {
        if self.blocked {
            Err(Error::Leftovers {
                count: self.leftovers.len(),
            })
        } else {
            Ok(())
        }
    }
}

/// The rewritten text together with its report.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub text: String,
    pub report: RewriteReport,
}

/// Rewrite the lazy imports of one file.
///
/// A rewrite that leaves loader calls behind is not written unless
/// `options.force` is set; the report then has `blocked` set.
pub fn fix_file(options: &FixOptions) -> Result<FixOutcome> {
    let original = match &options.input {
        InputSource::WorkingTree => read_source(&options.path)?,
        InputSource::Revision(rev) => GitSnapshot::discover(&options.path)?.read_at(rev, &options.path)?,
    };

    let rewritten = rewrite(&original, &options.rewrite)?;
    let leftovers = find_leftovers(&rewritten.text, &options.rewrite);
    let destination = options.destination().to_path_buf();

    // Loader calls in a file that was not rewritten are only reported
    let blocked = !leftovers.is_empty() && !options.force && !rewritten.is_unchanged();
    if !leftovers.is_empty() {
        debug!(count = leftovers.len(), force = options.force, "loader calls left after rewrite");
    }

    // Nothing changed and nothing to copy: leave the file alone
    let no_op = rewritten.is_unchanged()
        && options.input == InputSource::WorkingTree
        && destination == options.path;

    let written = match options.mode {
        WriteMode::Write if !blocked && !no_op => {
            write_source(&destination, &rewritten.text)?;
            info!(path = %destination.display(), "wrote rewritten file");
            true
        }
        _ => false,
    };

    let report = RewriteReport {
        path: options.path.clone(),
        source: options.input.clone(),
        output: destination,
        loader: options.rewrite.loader.clone(),
        converted: rewritten.converted,
        duplicates_removed: rewritten.duplicates_removed,
        loader_import_pruned: rewritten.loader_import_pruned,
        leftovers,
        written,
        blocked: blocked && options.mode == WriteMode::Write,
    };

    Ok(FixOutcome {
        text: rewritten.text,
        report,
    })
}
