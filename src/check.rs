//! Post-rewrite verification
//!
//! After a rewrite no code line should still call the loader. Anything that
//! does is reported with its line number so it can be fixed by hand.

use serde::Serialize;

use crate::rewrite::RewriteConfig;
use crate::string_utils::{identifier_positions, is_comment_line, truncate_chars};

/// Maximum number of characters of a leftover line shown in diagnostics.
pub const LEFTOVER_PREVIEW_CHARS: usize = 80;

/// A line that still contains a loader call after the rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leftover {
    /// 1-based line number
    pub line: usize,
    /// Trimmed line content, cut to `LEFTOVER_PREVIEW_CHARS`
    pub content: String,
}

/// List every code line of `text` that still calls the loader.
///
/// The text itself is never modified; callers decide whether to keep it.
pub fn find_leftovers(text: &str, config: &RewriteConfig) -> Vec<Leftover> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !is_comment_line(line) && calls(line, &config.loader))
        .map(|(index, line)| Leftover {
            line: index + 1,
            content: truncate_chars(line.trim(), LEFTOVER_PREVIEW_CHARS),
        })
        .collect()
}

/// `function(` or `function<...>(`
fn calls(line: &str, function: &str) -> bool {
    identifier_positions(line, function).any(|pos| {
        let rest = line[pos + function.len()..].trim_start();
        rest.starts_with('(') || rest.starts_with('<')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::rewrite;

    #[test]
    fn test_clean_text_has_no_leftovers() {
        let text = "import { Suspense } from 'react';\n\
import { Foo } from './Foo';\n\
// lazy(() => import('./Old')) was here\n\
const lazyCount = 1;\n";
        assert!(find_leftovers(text, &RewriteConfig::default()).is_empty());
    }

    #[test]
    fn test_leftovers_listed_with_line_numbers() {
        let text = "import { lazy } from 'react';\n\
const Foo = lazy(\n\
  () => import('./Foo')\n\
);\n\
const Bar = React.lazy (loadBar);\n";
        let leftovers = find_leftovers(text, &RewriteConfig::default());
        let lines: Vec<usize> = leftovers.iter().map(|l| l.line).collect();
        assert_eq!(lines, vec![2, 5]);
        assert_eq!(leftovers[0].content, "const Foo = lazy(");
        assert_eq!(leftovers[1].content, "const Bar = React.lazy (loadBar);");
    }

    #[test]
    fn test_check_does_not_modify_text() {
        let text = "const Foo = lazy(\n  () => import('./Foo')\n);\n";
        // The multi-line declaration is not converted, so it must be reported
        let result = rewrite(text, &RewriteConfig::default());
        assert!(result.is_err());

        let before = text.to_string();
        let leftovers = find_leftovers(text, &RewriteConfig::default());
        assert_eq!(leftovers.len(), 1);
        assert_eq!(leftovers[0].line, 1);
        assert_eq!(text, before);
    }

    #[test]
    fn test_long_line_truncated() {
        let line = format!("const X = lazy(() => import('./{}'));", "a".repeat(200));
        let leftovers = find_leftovers(&line, &RewriteConfig::default());
        assert_eq!(leftovers.len(), 1);
        assert_eq!(
            leftovers[0].content.chars().count(),
            LEFTOVER_PREVIEW_CHARS + 3
        );
        assert!(leftovers[0].content.ends_with("..."));
    }

    #[test]
    fn test_call_with_type_arguments() {
        let text = "import { lazy } from 'react';\n\
const Foo = lazy<FC>(() => import('./Foo'));\n";
        let leftovers = find_leftovers(text, &RewriteConfig::default());
        assert_eq!(leftovers.len(), 1);
        assert_eq!(leftovers[0].line, 2);
    }

    #[test]
    fn test_custom_loader() {
        let config = RewriteConfig::new("lazyLoad", "importModule");
        let text = "const a = lazy(x);\nconst b = lazyLoad(y);\n";
        let leftovers = find_leftovers(text, &config);
        assert_eq!(leftovers.len(), 1);
        assert_eq!(leftovers[0].line, 2);
    }
}
