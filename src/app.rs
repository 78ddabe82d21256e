use crate::config::Config;
use crate::event::{AppEvent, RefreshId};
use crate::git::parser;
use crate::git::types::{RepoLocation, TableData};
use crate::ui::{
    about_panel::AboutPanel,
    input::{self, Action},
    output_panel::OutputPanel,
    repo_table::RepoTable,
    repos_panel::ReposPanel,
    status_bar::StatusBar,
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use std::collections::VecDeque;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// At least one collector is still running.
    Scanning,
    /// A new table is waiting to be drawn.
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogLine {
    pub time: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogLine {
    pub fn timestamp(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

/// Append-only log that forgets its oldest lines past `capacity`.
#[derive(Debug, Clone)]
pub struct OutputLog {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl OutputLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(LogLine {
            time: Local::now(),
            level,
            message: message.into(),
        });
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &LogLine> + ExactSizeIterator {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Everything the widgets draw. Owned by [`App`], mutated only on the event loop.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub table: TableData,
    /// Refresh whose output is currently in `table`.
    pub table_source: Option<RefreshId>,
    pub table_updated: Option<DateTime<Local>>,
    pub repos: Option<Vec<RepoLocation>>,
    pub log: OutputLog,
    pub phase: Phase,
    pub in_flight: usize,
    pub table_scroll: usize,
    /// Lines scrolled back from the newest log entry.
    pub log_scroll: usize,
}

impl DashboardState {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            table: TableData::default(),
            table_source: None,
            table_updated: None,
            repos: None,
            log: OutputLog::new(log_capacity),
            phase: Phase::Idle,
            in_flight: 0,
            table_scroll: 0,
            log_scroll: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh(RefreshId),
}

pub struct App {
    pub config: Config,
    pub state: DashboardState,
    next_refresh: RefreshId,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut state = DashboardState::new(config.log_capacity);
        state.log.push(LogLevel::Info, "Welcome to Git Terminal");
        Self {
            config,
            state,
            next_refresh: 1,
            should_quit: false,
        }
    }

    /// Starts a new cycle. Earlier cycles keep running.
    pub fn begin_refresh(&mut self) -> RefreshId {
        let id = self.next_refresh;
        self.next_refresh += 1;
        self.state.in_flight += 1;
        self.state.phase = Phase::Scanning;
        self.log(LogLevel::Info, "Scanning folders for git files...");
        id
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Key(key) => return self.handle_action(input::map_key(key)),
            AppEvent::TimerFired => return Some(Command::Refresh(self.begin_refresh())),
            AppEvent::Resize => {}
            AppEvent::ReposFound { refresh, result } => match result {
                Ok(repos) => {
                    self.log(LogLevel::Info, format!("FOUND {}", repos.len()));
                    self.state.repos = Some(repos);
                }
                Err(e) => {
                    error!(refresh, error = %e, "repository discovery failed");
                    self.log(LogLevel::Error, format!("Error: {e}"));
                }
            },
            AppEvent::CollectorStderr { chunk, .. } => {
                self.log(LogLevel::Error, format!("Error: {}", chunk.trim_end()));
            }
            AppEvent::CollectorClosed { refresh, output } => self.finish_collection(refresh, &output),
            AppEvent::CollectorFailed { refresh, error } => {
                error!(refresh, %error, "status routine failed");
                self.log(LogLevel::Error, format!("Error: {error}"));
                self.collector_done();
            }
        }
        None
    }

    fn handle_action(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Refresh => return Some(Command::Refresh(self.begin_refresh())),
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => {
                if self.state.table_scroll + 1 < self.state.table.rows.len() {
                    self.state.table_scroll += 1;
                }
            }
            Action::ScrollUp => {
                self.state.table_scroll = self.state.table_scroll.saturating_sub(1);
            }
            Action::LogOlder => {
                if self.state.log_scroll + 1 < self.state.log.len() {
                    self.state.log_scroll += 1;
                }
            }
            Action::LogNewer => {
                self.state.log_scroll = self.state.log_scroll.saturating_sub(1);
            }
            Action::None => {}
        }
        None
    }

    /// Last writer wins: whichever cycle closes last owns the table.
    fn finish_collection(&mut self, refresh: RefreshId, output: &str) {
        self.log(LogLevel::Info, "Scanning finished!");
        self.collector_done();

        if output.is_empty() {
            self.log(LogLevel::Warn, "No data to display...");
            return;
        }

        let outcome = parser::parse(output);
        for rejected in &outcome.rejected {
            warn!(refresh, %rejected, "skipping status record");
            self.log(LogLevel::Warn, format!("Skipped {rejected}"));
        }
        if outcome.table.is_empty() {
            self.log(LogLevel::Warn, "No data to display...");
        }

        self.state.table = outcome.table;
        self.state.table_source = Some(refresh);
        self.state.table_updated = Some(Local::now());
        self.state.table_scroll = self
            .state
            .table_scroll
            .min(self.state.table.rows.len().saturating_sub(1));
        self.state.phase = Phase::Rendering;
    }

    fn collector_done(&mut self) {
        self.state.in_flight = self.state.in_flight.saturating_sub(1);
        if self.state.phase != Phase::Rendering {
            self.state.phase = self.settled_phase();
        }
    }

    fn settled_phase(&self) -> Phase {
        if self.state.in_flight > 0 {
            Phase::Scanning
        } else {
            Phase::Idle
        }
    }

    /// Called after each draw.
    pub fn rendered(&mut self) {
        if self.state.phase == Phase::Rendering {
            self.state.phase = self.settled_phase();
        }
    }

    fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.state.log.push(level, message);
        self.state.log_scroll = 0;
    }

    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(size);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
            .split(main_chunks[0]);

        let columns = [Constraint::Percentage(67), Constraint::Percentage(33)];
        let top = Layout::horizontal(columns).split(rows[0]);
        let bottom = Layout::horizontal(columns).split(rows[1]);

        frame.render_widget(
            RepoTable {
                table: &self.state.table,
                scroll: self.state.table_scroll,
                waiting: self.state.table_source.is_none() && self.state.in_flight > 0,
            },
            top[0],
        );
        frame.render_widget(
            ReposPanel {
                repos: self.state.repos.as_deref(),
            },
            top[1],
        );
        frame.render_widget(
            OutputPanel {
                log: &self.state.log,
                scroll: self.state.log_scroll,
            },
            bottom[0],
        );
        frame.render_widget(
            AboutPanel {
                root_dir: &self.config.root_dir,
            },
            bottom[1],
        );
        frame.render_widget(
            StatusBar {
                phase: self.state.phase,
                in_flight: self.state.in_flight,
                repo_count: self.state.repos.as_ref().map(Vec::len),
                row_count: self.state.table.rows.len(),
                last_update: self.state.table_updated.as_ref(),
                refresh_interval_ms: self.config.refresh_interval_ms(),
            },
            main_chunks[1],
        );
    }
}
