use std::fmt;
use std::path::PathBuf;

pub const TABLE_HEADERS: [&str; 3] = ["Name", "Current branch", "Diff with remote"];

/// A directory holding a `.git` marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoLocation {
    pub parent_directory: PathBuf,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchName {
    Develop,
    Master,
    Other(String),
}

impl BranchName {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "develop" => BranchName::Develop,
            "master" => BranchName::Master,
            other => BranchName::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BranchName::Develop => "develop",
            BranchName::Master => "master",
            BranchName::Other(name) => name,
        }
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local branch compared to its upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    UpToDate,
    NeedToPull,
    NeedToPush,
    Diverged,
    /// Anything the status routine reports that is not one of the above.
    Other(String),
}

impl SyncStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Up-to-date" => SyncStatus::UpToDate,
            "Need to pull" => SyncStatus::NeedToPull,
            "Need to push" => SyncStatus::NeedToPush,
            "Diverged" => SyncStatus::Diverged,
            other => SyncStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SyncStatus::UpToDate => "Up-to-date",
            SyncStatus::NeedToPull => "Need to pull",
            SyncStatus::NeedToPush => "Need to push",
            SyncStatus::Diverged => "Diverged",
            SyncStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusRow {
    pub repo_name: String,
    pub branch: BranchName,
    pub sync_status: SyncStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableData {
    pub headers: [String; 3],
    pub rows: Vec<StatusRow>,
}

impl TableData {
    pub fn new(rows: Vec<StatusRow>) -> Self {
        Self {
            headers: TABLE_HEADERS.map(String::from),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain string cells, one inner vec per row, in header order.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.repo_name.clone(),
                    row.branch.to_string(),
                    row.sync_status.to_string(),
                ]
            })
            .collect()
    }
}

impl Default for TableData {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_classify() {
        assert_eq!(SyncStatus::parse("Up-to-date"), SyncStatus::UpToDate);
        assert_eq!(SyncStatus::parse("Need to pull"), SyncStatus::NeedToPull);
        assert_eq!(SyncStatus::parse("Need to push"), SyncStatus::NeedToPush);
        assert_eq!(SyncStatus::parse("Diverged"), SyncStatus::Diverged);
    }

    #[test]
    fn unknown_status_keeps_raw_text() {
        let status = SyncStatus::parse("No upstream");
        assert!(matches!(status, SyncStatus::Other(_)));
        assert_eq!(status.to_string(), "No upstream");
    }

    #[test]
    fn status_matching_is_case_sensitive() {
        assert_eq!(
            SyncStatus::parse("up-to-date"),
            SyncStatus::Other("up-to-date".to_string())
        );
    }

    #[test]
    fn branch_kinds() {
        assert_eq!(BranchName::parse("develop"), BranchName::Develop);
        assert_eq!(BranchName::parse("master"), BranchName::Master);
        assert_eq!(
            BranchName::parse("feat/login"),
            BranchName::Other("feat/login".to_string())
        );
        assert_eq!(BranchName::parse("feat/login").as_str(), "feat/login");
    }

    #[test]
    fn cells_follow_header_order() {
        let table = TableData::new(vec![StatusRow {
            repo_name: "alpha".to_string(),
            branch: BranchName::Master,
            sync_status: SyncStatus::Diverged,
        }]);
        assert_eq!(table.headers[2], "Diff with remote");
        assert_eq!(table.cells(), vec![vec!["alpha", "master", "Diverged"]]);
    }
}
