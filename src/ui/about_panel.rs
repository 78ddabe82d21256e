use crate::ui::{panel_block, theme};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use std::path::Path;

const CONTROLS: &[(&str, &str)] = &[
    ("Refresh repositories:", "Control+r or r"),
    ("Scroll table:", "j/k or \u{2191}/\u{2193}"),
    ("Scroll output:", "PgUp/PgDn"),
    ("Quit:", "ESC, Control+c or q"),
];

pub struct AboutPanel<'a> {
    pub root_dir: &'a Path,
}

impl<'a> Widget for AboutPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Current directory: ", bold),
                Span::raw(self.root_dir.display().to_string()),
            ]),
            Line::raw(""),
            Line::from(Span::styled("Controls List:", bold)),
            Line::from(Span::styled(
                "\u{2500}".repeat(area.width.saturating_sub(2) as usize),
                Style::default().fg(theme::DIM_TEXT),
            )),
        ];
        lines.extend(CONTROLS.iter().map(|(label, keys)| {
            Line::from(vec![
                Span::styled(format!("{label} "), bold),
                Span::styled(keys.to_string(), Style::default().fg(theme::ACCENT)),
            ])
        }));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel_block("About"))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn shows_directory_and_controls() {
        let area = Rect::new(0, 0, 70, 10);
        let mut buf = Buf::empty(area);
        AboutPanel {
            root_dir: Path::new("/home/dev/code"),
        }
        .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Current directory: /home/dev/code"));
        assert!(text.contains("Control+r or r"));
        assert!(text.contains("ESC, Control+c or q"));
    }
}
