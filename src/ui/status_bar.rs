use crate::app::Phase;
use crate::ui::theme;
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBar<'a> {
    pub phase: Phase,
    pub in_flight: usize,
    pub repo_count: Option<usize>,
    pub row_count: usize,
    pub last_update: Option<&'a DateTime<Local>>,
    pub refresh_interval_ms: u64,
}

impl<'a> StatusBar<'a> {
    fn phase_label(&self) -> String {
        match self.phase {
            Phase::Idle => "idle".to_string(),
            Phase::Scanning if self.in_flight > 1 => format!("scanning ({})", self.in_flight),
            Phase::Scanning => "scanning".to_string(),
            Phase::Rendering => "rendering".to_string(),
        }
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        let sep = Span::styled(
            "\u{2502}",
            Style::default().fg(theme::BORDER_COLOR).bg(theme::STATUS_BG),
        );

        let phase_style = match self.phase {
            Phase::Idle => bg.fg(theme::DIM_TEXT),
            _ => bg.fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        };

        let repos = self
            .repo_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        let updated = self
            .last_update
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.phase_label()), phase_style),
            sep.clone(),
            Span::styled(format!(" repos: {repos} "), bg),
            sep.clone(),
            Span::styled(format!(" rows: {} ", self.row_count), bg),
            sep.clone(),
            Span::styled(format!(" updated: {updated} "), bg),
            sep,
            Span::styled(
                format!(" every {}s ", self.refresh_interval_ms / 1000),
                bg.fg(theme::DIM_TEXT),
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
