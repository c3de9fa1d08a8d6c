//! Lazy import rewriting
//!
//! Turns lazily loaded component declarations back into plain imports.
//!
//! # Passes
//!
//! 1. Every line matching the lazy declaration shape (see [`lazy`]) is
//!    replaced in place by the equivalent import, so output order follows
//!    source order. A `// Lazy ...` comment right above it goes too.
//! 2. Imports made redundant by the conversion are removed ([`dedupe`]).
//! 3. The loader is dropped from its import line once unused ([`prune`]).
//!
//! Text without any lazy declaration is returned byte for byte.

mod config;
mod dedupe;
mod imports;
mod lazy;
mod prune;

use thiserror::Error;
use tracing::debug;

use crate::source::SourceText;

pub use config::RewriteConfig;
pub use imports::{ImportLine, Specifier};
pub use lazy::{EagerImport, LazyImport, LineMatch, match_declaration};

/// A line that looks like a lazy declaration but could not be converted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("line {line}: unrecognized lazy declaration, {reason}: {content}")]
    UnrecognizedDeclaration {
        line: usize,
        content: String,
        reason: String,
    },
}

/// Result of a successful rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    /// Declarations that were converted, in source order
    pub converted: Vec<LazyImport>,
    /// 1-based line numbers (after conversion) of duplicate imports removed
    pub duplicates_removed: Vec<usize>,
    /// Whether the loader was dropped from its import line
    pub loader_import_pruned: bool,
    /// Number of `// Lazy ...` comments dropped
    pub comments_removed: usize,
}

impl Rewrite {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            converted: Vec::new(),
            duplicates_removed: Vec::new(),
            loader_import_pruned: false,
            comments_removed: 0,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.converted.is_empty()
    }
}

/// Rewrite every lazy declaration in `text` into a direct import.
pub fn rewrite(text: &str, config: &RewriteConfig) -> Result<Rewrite, RewriteError> {
    let source = SourceText::parse(text);
    let mut lines: Vec<String> = Vec::with_capacity(source.lines().len());
    let mut converted = Vec::new();
    let mut comments_removed = 0;

    for (index, line) in source.lines().iter().enumerate() {
        let line_number = index + 1;
        match match_declaration(line, line_number, config) {
            LineMatch::NotLazy => lines.push(line.clone()),
            LineMatch::NearMiss(reason) => {
                return Err(RewriteError::UnrecognizedDeclaration {
                    line: line_number,
                    content: crate::string_utils::truncate_chars(line.trim(), 120),
                    reason,
                });
            }
            LineMatch::Lazy(import) => {
                if config.drop_lazy_comments && lines.last().is_some_and(|prev| is_lazy_comment(prev))
                {
                    lines.pop();
                    comments_removed += 1;
                }
                let eager = import.to_eager();
                debug!(line = line_number, import = %eager.statement, "converted lazy declaration");
                // Only set in files with mixed line endings
                let cr = if line.ends_with('\r') { "\r" } else { "" };
                lines.extend(eager.lines().into_iter().map(|l| l + cr));
                converted.push(import);
            }
        }
    }

    if converted.is_empty() {
        debug!("no lazy declarations found");
        return Ok(Rewrite::unchanged(text));
    }

    let duplicates_removed = if config.dedupe {
        dedupe::remove_duplicates(&mut lines, &converted)
    } else {
        Vec::new()
    };

    let loader_import_pruned =
        config.prune_loader_import && prune::prune_loader_import(&mut lines, &config.loader);

    Ok(Rewrite {
        text: source.with_lines(lines).render(),
        converted,
        duplicates_removed,
        loader_import_pruned,
        comments_removed,
    })
}

fn is_lazy_comment(line: &str) -> bool {
    line.trim_start()
        .strip_prefix("//")
        .is_some_and(|comment| comment.to_lowercase().contains("lazy"))
}
