use crate::app::OutputLog;
use crate::ui::{panel_block, theme};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Newest lines at the bottom; `scroll` moves the window back in time.
pub struct OutputPanel<'a> {
    pub log: &'a OutputLog,
    pub scroll: usize,
}

impl<'a> Widget for OutputPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = panel_block("Output");
        let height = block.inner(area).height as usize;

        let end = self.log.len().saturating_sub(self.scroll);
        let start = end.saturating_sub(height);

        let lines: Vec<Line> = self
            .log
            .lines()
            .skip(start)
            .take(end - start)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", entry.timestamp()),
                        Style::default().fg(theme::DIM_TEXT),
                    ),
                    Span::styled(entry.message.clone(), theme::log_style(entry.level)),
                ])
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LogLevel;
    use crate::test_utils::*;

    fn render(log: &OutputLog, scroll: usize) -> Buf {
        // 4 visible lines inside the border
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buf::empty(area);
        OutputPanel { log, scroll }.render(area, &mut buf);
        buf
    }

    fn log_of(n: usize) -> OutputLog {
        let mut log = OutputLog::new(100);
        for i in 0..n {
            log.push(LogLevel::Info, format!("entry-{i:02}"));
        }
        log
    }

    #[test]
    fn shows_newest_lines() {
        let text = buffer_text(&render(&log_of(10), 0));
        assert!(text.contains("entry-09"));
        assert!(text.contains("entry-06"));
        assert!(!text.contains("entry-05"));
    }

    #[test]
    fn scroll_moves_back() {
        let text = buffer_text(&render(&log_of(10), 3));
        assert!(text.contains("entry-06"));
        assert!(text.contains("entry-03"));
        assert!(!text.contains("entry-07"));
    }

    #[test]
    fn errors_are_red() {
        let mut log = OutputLog::new(10);
        log.push(LogLevel::Error, "Error: boom");
        let buf = render(&log, 0);
        let (x, y) = find_text(&buf, "Error: boom").unwrap();
        assert_eq!(buf[(x, y)].fg, theme::ERROR_FG);
    }

    #[test]
    fn lines_are_timestamped() {
        let log = log_of(1);
        let stamp = log.lines().last().unwrap().timestamp();
        assert_eq!(stamp.len(), 8);
        assert!(buffer_text(&render(&log, 0)).contains(&format!("[{stamp}] entry-00")));
    }
}
