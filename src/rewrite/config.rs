//! Rewrite configuration types

const DEFAULT_LOADER: &str = "lazy";
const DEFAULT_IMPORTER: &str = "import";

/// Configuration for the lazy import rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Name of the deferred-load wrapper (`lazy` in React)
    pub loader: String,
    /// Name of the dynamic import call inside the wrapper
    pub importer: String,
    /// Drop a `// Lazy ...` comment sitting right above a converted declaration
    pub drop_lazy_comments: bool,
    /// Remove imports that the conversion made redundant
    pub dedupe: bool,
    /// Drop the loader from its import line once nothing references it
    pub prune_loader_import: bool,
}

impl RewriteConfig {
    /// Config for a custom loader/importer pair, all passes enabled.
    pub fn new(loader: impl Into<String>, importer: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            importer: importer.into(),
            ..Default::default()
        }
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            loader: DEFAULT_LOADER.to_string(),
            importer: DEFAULT_IMPORTER.to_string(),
            drop_lazy_comments: true,
            dedupe: true,
            prune_loader_import: true,
        }
    }
}
