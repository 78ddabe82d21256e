use crate::git::types::TableData;
use crate::ui::{panel_block, theme, truncate_with_ellipsis};
use ratatui::{
    buffer::Buffer as Buf,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Widget},
};

const NAME_WIDTH: u16 = 20;
const BRANCH_WIDTH: u16 = 60;
const STATUS_WIDTH: u16 = 16;
const COLUMN_WIDTHS: [u16; 3] = [NAME_WIDTH, BRANCH_WIDTH, STATUS_WIDTH];

pub struct RepoTable<'a> {
    pub table: &'a TableData,
    pub scroll: usize,
    /// No table has arrived yet and a scan is running.
    pub waiting: bool,
}

impl<'a> Widget for RepoTable<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = panel_block("Repositories list");

        if self.table.is_empty() {
            let notice = if self.waiting {
                "Scanning..."
            } else {
                "No data to display"
            };
            Paragraph::new(Line::from(Span::styled(
                notice,
                Style::default().fg(theme::DIM_TEXT),
            )))
            .block(block)
            .render(area, buf);
            return;
        }

        let header = Row::new(
            self.table
                .headers
                .iter()
                .map(|h| Cell::from(h.as_str()))
                .collect::<Vec<_>>(),
        )
        .style(
            Style::default()
                .fg(theme::HEADER_FG)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

        let rows = self
            .table
            .rows
            .iter()
            .zip(self.table.cells())
            .skip(self.scroll)
            .map(|(row, cells)| {
                let styles = [
                    theme::repo_name_style(),
                    theme::branch_style(&row.branch),
                    theme::status_style(&row.sync_status),
                ];
                Row::new(cells.into_iter().zip(styles).zip(COLUMN_WIDTHS).map(
                    |((text, style), width)| {
                        Cell::from(Span::styled(
                            truncate_with_ellipsis(&text, width as usize),
                            style,
                        ))
                    },
                ))
            });

        let widths = [
            Constraint::Length(NAME_WIDTH),
            Constraint::Max(BRANCH_WIDTH),
            Constraint::Length(STATUS_WIDTH),
        ];

        Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .block(block)
            .render(area, buf);
    }
}
