//! Dropping the loader from its import once it is unused

use tracing::debug;

use super::imports::ImportLine;
use crate::string_utils::{identifier_positions, is_comment_line};

/// True if some code line outside import declarations uses `name`.
///
/// Property accesses such as `React.lazy` do not count as uses of the
/// imported binding.
pub(crate) fn is_referenced(lines: &[String], name: &str) -> bool {
    lines.iter().any(|line| {
        !is_comment_line(line)
            && ImportLine::parse(line).is_none()
            && identifier_positions(line, name).any(|pos| !line[..pos].ends_with('.'))
    })
}

/// Remove `loader` from the import lines that bring it in, if nothing else
/// uses it. A declaration left with no names is deleted.
///
/// Returns true if any import line changed.
pub(crate) fn prune_loader_import(lines: &mut Vec<String>, loader: &str) -> bool {
    if is_referenced(lines, loader) {
        debug!(loader, "loader still referenced, keeping its import");
        return false;
    }

    let mut pruned = false;
    lines.retain_mut(|line| {
        let Some(mut decl) = ImportLine::parse(line) else {
            return true;
        };
        if !decl.imports_name(loader) {
            return true;
        }
        decl.remove_local(loader);
        pruned = true;
        if decl.is_empty() {
            debug!(module = %decl.module, "removing empty import");
            return false;
        }
        *line = decl.render();
        true
    });
    pruned
}
