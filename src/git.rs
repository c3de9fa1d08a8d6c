//! Reading source files from git history

use git2::Repository;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::source::decode;

/// Read-only handle on the repository that contains a file.
pub struct GitSnapshot {
    repo: Repository,
    repo_root: PathBuf,
}

impl GitSnapshot {
    /// Discover the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self> {
        let start = absolute(path)?;
        let search_from = if start.is_dir() {
            start.as_path()
        } else {
            start.parent().unwrap_or(Path::new("/"))
        };

        let repo = Repository::discover(search_from).map_err(|_| Error::NotInRepository {
            path: path.to_path_buf(),
        })?;
        let repo_root = repo
            .workdir()
            .ok_or_else(|| Error::NotInRepository {
                path: path.to_path_buf(),
            })?
            .to_path_buf();

        Ok(Self { repo, repo_root })
    }

    /// Path of `path` relative to the repository root, with `/` separators.
    fn relative_path(&self, path: &Path) -> Result<String> {
        let absolute = absolute(path)?;
        // The workdir reported by git2 is canonical, so compare canonical forms
        let root = self
            .repo_root
            .canonicalize()
            .unwrap_or_else(|_| self.repo_root.clone());
        let absolute = match absolute.parent().map(Path::canonicalize) {
            Some(Ok(parent)) => parent.join(absolute.file_name().unwrap_or_default()),
            _ => absolute,
        };

        let relative = absolute
            .strip_prefix(&root)
            .map_err(|_| Error::NotInRepository {
                path: path.to_path_buf(),
            })?;

        Ok(relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }

    /// Contents of `path` as of revision `rev`, ignoring the working tree.
    pub fn read_at(&self, rev: &str, path: &Path) -> Result<String> {
        let relative = self.relative_path(path)?;
        tracing::debug!(rev, path = %relative, "reading file from git history");

        let commit = self.repo.revparse_single(rev)?.peel_to_commit()?;
        let tree = commit.tree()?;
        let entry = tree
            .get_path(Path::new(&relative))
            .map_err(|_| Error::NotInRevision {
                path: path.to_path_buf(),
                rev: rev.to_string(),
            })?;
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;

        decode(blob.content().to_vec(), path)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestRepo;

    #[test]
    fn test_read_committed_version() {
        let repo = TestRepo::with_git();
        let file = repo.add_file("src/App.tsx", "committed\n");
        repo.commit("initial");
        std::fs::write(&file, "working tree\n").unwrap();

        let snapshot = GitSnapshot::discover(&file).unwrap();
        assert_eq!(snapshot.read_at("HEAD", &file).unwrap(), "committed\n");
    }

    #[test]
    fn test_read_older_revision() {
        let repo = TestRepo::with_git();
        let file = repo.add_file("App.tsx", "first\n");
        repo.commit("first");
        repo.add_file("App.tsx", "second\n");
        repo.commit("second");

        let snapshot = GitSnapshot::discover(&file).unwrap();
        assert_eq!(snapshot.read_at("HEAD~1", &file).unwrap(), "first\n");
        assert_eq!(snapshot.read_at("HEAD", &file).unwrap(), "second\n");
    }

    #[test]
    fn test_bom_dropped_from_blob() {
        let repo = TestRepo::with_git();
        let file = repo.add_file("App.tsx", "\u{FEFF}body\n");
        repo.commit("bom");

        let snapshot = GitSnapshot::discover(&file).unwrap();
        assert_eq!(snapshot.read_at("HEAD", &file).unwrap(), "body\n");
    }

    #[test]
    fn test_bad_revision() {
        let repo = TestRepo::with_git();
        let file = repo.add_file("App.tsx", "x\n");
        repo.commit("initial");

        let snapshot = GitSnapshot::discover(&file).unwrap();
        let result = snapshot.read_at("no-such-branch", &file);
        assert!(matches!(result, Err(Error::Git(_))));
    }

    #[test]
    fn test_untracked_path_at_revision() {
        let repo = TestRepo::with_git();
        repo.add_file("tracked.tsx", "x\n");
        repo.commit("initial");
        let untracked = repo.add_untracked("App.tsx", "y\n");

        let snapshot = GitSnapshot::discover(&untracked).unwrap();
        let result = snapshot.read_at("HEAD", &untracked);
        assert!(matches!(result, Err(Error::NotInRevision { .. })));
    }

    #[test]
    fn test_outside_repository() {
        let repo = TestRepo::new();
        let file = repo.add_file("App.tsx", "x\n");
        // A temp dir may itself sit inside a repository on some machines
        if Repository::discover(repo.path()).is_err() {
            assert!(matches!(
                GitSnapshot::discover(&file),
                Err(Error::NotInRepository { .. })
            ));
        }
    }
}
