use crate::error::{GitTerminalError, Result};
use crate::git::types::RepoLocation;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const MARKER: &str = ".git";
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Walks `root` looking for `.git` entries, never deeper than `max_depth`
/// (root is depth 0) and never inside a marker. Results are in walk order.
pub fn find(root: &Path, max_depth: usize) -> Result<Vec<RepoLocation>> {
    let discovery_err = |source: walkdir::Error| GitTerminalError::Discovery {
        root: root.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    let mut walker = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(discovery_err)?;
        if entry.depth() == 0 || entry.file_name() != MARKER {
            continue;
        }

        if entry.file_type().is_dir() {
            walker.skip_current_dir();
        }

        if let Some(parent) = entry.path().parent() {
            found.push(location_for(parent));
        }
    }

    debug!(root = %root.display(), count = found.len(), "repository walk finished");
    Ok(found)
}

/// Runs [`find`] on the blocking pool.
pub async fn find_async(root: PathBuf, max_depth: usize) -> Result<Vec<RepoLocation>> {
    tokio::task::spawn_blocking(move || find(&root, max_depth)).await?
}

fn location_for(dir: &Path) -> RepoLocation {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string());
    RepoLocation {
        parent_directory: dir.to_path_buf(),
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn names(found: &[RepoLocation]) -> Vec<String> {
        let mut names: Vec<String> = found.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn finds_repos_at_various_depths() {
        let tmp = tempfile::tempdir().unwrap();
        make_repo(tmp.path(), "alpha");
        make_repo(tmp.path(), "group/beta");
        make_plain_dir(tmp.path(), "notes/drafts");

        let found = find(tmp.path(), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(names(&found), vec!["alpha", "beta"]);
    }

    #[test]
    fn every_result_contains_the_marker() {
        let tmp = tempfile::tempdir().unwrap();
        make_repo(tmp.path(), "a");
        make_repo(tmp.path(), "b/c");
        make_plain_dir(tmp.path(), "b/d");

        for repo in find(tmp.path(), DEFAULT_MAX_DEPTH).unwrap() {
            assert!(repo.parent_directory.join(MARKER).exists());
        }
    }

    #[test]
    fn does_not_descend_into_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = make_repo(tmp.path(), "alpha");
        // a `.git` nested inside the marker must not be reported
        make_plain_dir(&repo.join(MARKER), "modules/sub/.git");

        let found = find(tmp.path(), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parent_directory, repo);
    }

    #[test]
    fn nested_repositories_are_found() {
        let tmp = tempfile::tempdir().unwrap();
        make_repo(tmp.path(), "outer");
        make_repo(tmp.path(), "outer/vendor/inner");

        let found = find(tmp.path(), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(names(&found), vec!["inner", "outer"]);
    }

    #[test]
    fn respects_max_depth() {
        let tmp = tempfile::tempdir().unwrap();
        // marker sits at depth 3
        make_repo(tmp.path(), "a/b");
        // marker sits at depth 6
        make_repo(tmp.path(), "a/b/c/d/e");

        assert!(find(tmp.path(), 2).unwrap().is_empty());
        let found = find(tmp.path(), 3).unwrap();
        assert_eq!(names(&found), vec!["b"]);
        let found = find(tmp.path(), 6).unwrap();
        assert_eq!(names(&found), vec!["b", "e"]);
    }

    #[test]
    fn root_itself_can_be_a_repo() {
        let tmp = tempfile::tempdir().unwrap();
        make_repo(tmp.path(), ".");
        let found = find(tmp.path(), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parent_directory, tmp.path());
    }

    #[test]
    fn gitfile_marks_a_worktree() {
        let tmp = tempfile::tempdir().unwrap();
        let wt = make_plain_dir(tmp.path(), "worktree");
        std::fs::write(wt.join(MARKER), "gitdir: /elsewhere\n").unwrap();

        let found = find(tmp.path(), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(names(&found), vec!["worktree"]);
    }

    #[test]
    fn missing_root_is_a_discovery_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = find(&tmp.path().join("nope"), DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, GitTerminalError::Discovery { .. }));
    }

    #[tokio::test]
    async fn async_walk_matches_sync_walk() {
        let tmp = tempfile::tempdir().unwrap();
        make_repo(tmp.path(), "alpha");
        let found = find_async(tmp.path().to_path_buf(), DEFAULT_MAX_DEPTH)
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["alpha"]);
    }
}
