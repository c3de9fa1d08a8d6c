//! Output configuration types

use crate::fix::WriteMode;

/// Configuration for report output.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// What the run did with the text, which decides the wording
    pub mode: WriteMode,
    /// List each converted import under the headline
    pub show_imports: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            mode: WriteMode::Write,
            show_imports: true,
        }
    }
}
