use crate::git::types::{BranchName, StatusRow, SyncStatus, TableData};
use thiserror::Error;

const FIELD_SEPARATOR: char = ';';

/// A status line that did not carry `path;branch;status`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed status record on line {line_number}: expected 3 fields, found {field_count}: {line:?}")]
pub struct MalformedRecord {
    pub line_number: usize,
    pub line: String,
    pub field_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub table: TableData,
    pub rejected: Vec<MalformedRecord>,
}

/// Parses collector output into a table sorted by repository name.
/// Blank lines are ignored; short records are skipped and reported.
pub fn parse(raw: &str) -> ParseOutcome {
    let mut rows = Vec::new();
    let mut rejected = Vec::new();

    for (idx, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Ok(row) => rows.push(row),
            Err(field_count) => rejected.push(MalformedRecord {
                line_number: idx + 1,
                line: line.to_string(),
                field_count,
            }),
        }
    }

    sort_rows(&mut rows);
    ParseOutcome {
        table: TableData::new(rows),
        rejected,
    }
}

/// On a short record, returns how many fields it had.
fn parse_record(line: &str) -> Result<StatusRow, usize> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [path, branch, status, ..] = fields.as_slice() else {
        return Err(fields.len());
    };

    Ok(StatusRow {
        repo_name: basename(path).to_string(),
        branch: BranchName::parse(branch),
        sync_status: SyncStatus::parse(status),
    })
}

/// Ascending, case-sensitive, stable.
pub fn sort_rows(rows: &mut [StatusRow]) {
    rows.sort_by(|a, b| a.repo_name.cmp(&b.repo_name));
}

fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
