use crate::app::LogLevel;
use crate::git::types::{BranchName, SyncStatus};
use ratatui::style::{Color, Modifier, Style};

pub const BORDER_COLOR: Color = Color::Rgb(90, 90, 120);
pub const TITLE_COLOR: Color = Color::Rgb(140, 115, 200);
pub const HEADER_FG: Color = Color::White;
pub const STATUS_BG: Color = Color::Rgb(30, 30, 40);
pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
pub const ACCENT: Color = Color::Rgb(140, 115, 200);
pub const WARN_FG: Color = Color::Rgb(255, 165, 0);
pub const ERROR_FG: Color = Color::Red;

pub fn repo_name_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn branch_style(branch: &BranchName) -> Style {
    match branch {
        BranchName::Develop => Style::default().fg(Color::Green),
        BranchName::Master => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        BranchName::Other(_) => Style::default().fg(Color::Cyan),
    }
}

/// Unknown statuses are left unstyled.
pub fn status_style(status: &SyncStatus) -> Style {
    match status {
        SyncStatus::UpToDate => Style::default().fg(Color::Green),
        SyncStatus::NeedToPull | SyncStatus::NeedToPush => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        SyncStatus::Diverged => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        SyncStatus::Other(_) => Style::default(),
    }
}

pub fn log_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Info => Style::default(),
        LogLevel::Warn => Style::default().fg(WARN_FG),
        LogLevel::Error => Style::default().fg(ERROR_FG),
    }
}

pub fn panel_title_style() -> Style {
    Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_unstyled() {
        assert_eq!(
            status_style(&SyncStatus::Other("No upstream".into())),
            Style::default()
        );
    }

    #[test]
    fn pull_and_push_share_a_style() {
        assert_eq!(
            status_style(&SyncStatus::NeedToPull),
            status_style(&SyncStatus::NeedToPush)
        );
        assert_ne!(
            status_style(&SyncStatus::Diverged),
            status_style(&SyncStatus::UpToDate)
        );
    }

    #[test]
    fn master_is_bold_develop_is_not() {
        assert!(branch_style(&BranchName::Master)
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(!branch_style(&BranchName::Develop)
            .add_modifier
            .contains(Modifier::BOLD));
    }
}
