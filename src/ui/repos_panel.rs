use crate::git::types::RepoLocation;
use crate::ui::{panel_block, theme};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// Raw discovery output, in walk order.
pub struct ReposPanel<'a> {
    pub repos: Option<&'a [RepoLocation]>,
}

impl<'a> Widget for ReposPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = panel_block("Repositories");
        let dim = Style::default().fg(theme::DIM_TEXT);

        let lines: Vec<Line> = match self.repos {
            None => vec![Line::from(Span::styled("Waiting for first scan...", dim))],
            Some([]) => vec![Line::from(Span::styled("No repositories found", dim))],
            Some(repos) => repos
                .iter()
                .map(|repo| {
                    Line::from(vec![
                        Span::styled(
                            repo.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" "),
                        Span::styled(repo.parent_directory.display().to_string(), dim),
                    ])
                })
                .collect(),
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn render(repos: Option<&[RepoLocation]>) -> String {
        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buf::empty(area);
        ReposPanel { repos }.render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn placeholder_before_first_scan() {
        assert!(render(None).contains("Waiting for first scan"));
        assert!(render(Some(&[])).contains("No repositories found"));
    }

    #[test]
    fn lists_discovered_locations() {
        let repos = vec![make_location("/src/alpha"), make_location("/src/beta")];
        let text = render(Some(&repos));
        assert!(text.contains("alpha /src/alpha"));
        assert!(text.contains("beta /src/beta"));
    }
}
