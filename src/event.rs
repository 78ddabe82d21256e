use crate::error::Result;
use crate::git::types::RepoLocation;
use crossterm::event::KeyEvent;

/// Identifies one refresh cycle. Increases with every trigger.
pub type RefreshId = u64;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    TimerFired,
    ReposFound {
        refresh: RefreshId,
        result: Result<Vec<RepoLocation>>,
    },
    CollectorStderr {
        refresh: RefreshId,
        chunk: String,
    },
    CollectorClosed {
        refresh: RefreshId,
        output: String,
    },
    CollectorFailed {
        refresh: RefreshId,
        error: String,
    },
}
