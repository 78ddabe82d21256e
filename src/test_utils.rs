#![cfg(test)]

use crate::git::types::*;
use std::path::{Path, PathBuf};

pub fn make_plain_dir(root: &Path, rel: &str) -> PathBuf {
    let dir = root.join(rel);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Creates `root/rel/.git/` with just enough inside to look like a repository.
pub fn make_repo(root: &Path, rel: &str) -> PathBuf {
    let dir = make_plain_dir(root, rel);
    let git_dir = make_plain_dir(&dir, ".git");
    std::fs::write(git_dir.join("HEAD"), "ref: refs/heads/master\n").unwrap();
    dir
}

pub fn make_row(name: &str, branch: &str, status: &str) -> StatusRow {
    StatusRow {
        repo_name: name.to_string(),
        branch: BranchName::parse(branch),
        sync_status: SyncStatus::parse(status),
    }
}

pub fn make_location(parent: &str) -> RepoLocation {
    let path = PathBuf::from(parent);
    RepoLocation {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        parent_directory: path,
    }
}

pub fn buffer_lines(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buf.area;
    (area.y..area.bottom())
        .map(|y| {
            (area.x..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

pub fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    buffer_lines(buf).join("\n")
}

/// Position of the first cell of `needle`. Only meaningful for ASCII text.
pub fn find_text(buf: &ratatui::buffer::Buffer, needle: &str) -> Option<(u16, u16)> {
    buffer_lines(buf).iter().enumerate().find_map(|(row, line)| {
        line.find(needle)
            .map(|col| (buf.area.x + col as u16, buf.area.y + row as u16))
    })
}
