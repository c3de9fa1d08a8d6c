//! Removing imports made redundant by the conversion

use tracing::debug;

use super::imports::ImportLine;
use super::lazy::LazyImport;

/// Drop extra declarations that bind the same name as a converted import.
///
/// For each converted entry, all single-line imports binding the same local
/// name to the same export of the same module are collected. One survives:
/// the first declaration that also imports other names, otherwise the first
/// in source order. Single-name duplicates are deleted, multi-name ones lose
/// just that name.
///
/// Returns the 1-based numbers (relative to `lines` on entry) of the deleted
/// lines.
pub(crate) fn remove_duplicates(lines: &mut Vec<String>, converted: &[LazyImport]) -> Vec<usize> {
    let mut parsed: Vec<Option<ImportLine>> =
        lines.iter().map(|line| ImportLine::parse(line)).collect();
    let mut removed = vec![false; lines.len()];

    for import in converted {
        let candidates: Vec<usize> = parsed
            .iter()
            .enumerate()
            .filter(|(i, decl)| {
                !removed[*i]
                    && decl.as_ref().is_some_and(|d| {
                        d.binds(&import.binding, import.export.as_deref(), &import.module)
                    })
            })
            .map(|(i, _)| i)
            .collect();

        if candidates.len() < 2 {
            continue;
        }

        let keeper = candidates
            .iter()
            .copied()
            .find(|&i| parsed[i].as_ref().is_some_and(|d| d.binding_count() > 1))
            .unwrap_or(candidates[0]);

        for &i in candidates.iter().filter(|&&i| i != keeper) {
            let Some(decl) = parsed[i].as_mut() else {
                continue;
            };
            if decl.binding_count() == 1 {
                debug!(line = i + 1, binding = %import.binding, "removing duplicate import");
                removed[i] = true;
            } else {
                debug!(line = i + 1, binding = %import.binding, "dropping duplicate specifier");
                decl.remove_local(&import.binding);
                lines[i] = decl.render();
            }
        }
    }

    let removed_lines: Vec<usize> = removed
        .iter()
        .enumerate()
        .filter(|(_, gone)| **gone)
        .map(|(i, _)| i + 1)
        .collect();

    let mut index = 0;
    lines.retain(|_| {
        let keep = !removed[index];
        index += 1;
        keep
    });

    removed_lines
}
