pub mod about_panel;
pub mod input;
pub mod output_panel;
pub mod repo_table;
pub mod repos_panel;
pub mod status_bar;
pub mod theme;

use ratatui::{
    style::Style,
    text::Span,
    widgets::{Block, Borders},
};
use unicode_width::UnicodeWidthStr;

pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max <= 1 {
        return "\u{2026}".to_string();
    }
    let mut result = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if w + cw > max - 1 {
            break;
        }
        result.push(ch);
        w += cw;
    }
    result.push('\u{2026}');
    result
}

pub fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_COLOR))
        .title(Span::styled(format!(" {title} "), theme::panel_title_style()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("feature/login", 8), "feature\u{2026}");
        assert_eq!(truncate_with_ellipsis("abc", 1), "\u{2026}");
    }
}
