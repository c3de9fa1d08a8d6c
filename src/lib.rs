//! delazy - turn lazily loaded component imports back into plain imports

pub mod check;
pub mod error;
pub mod fix;
pub mod git;
pub mod output;
pub mod rewrite;
pub mod source;
pub mod string_utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use check::{Leftover, find_leftovers};
pub use error::{Error, Result};
pub use fix::{FixOptions, FixOutcome, InputSource, RewriteReport, WriteMode, fix_file};
pub use git::GitSnapshot;
pub use output::{OutputConfig, ReportFormatter, print_json};
pub use rewrite::{LazyImport, Rewrite, RewriteConfig, RewriteError, rewrite};
pub use source::{SourceText, read_source, write_source};
