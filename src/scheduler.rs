use crate::config::Config;
use crate::event::{AppEvent, RefreshId};
use crate::git::collector::{CollectorEvent, StatusCollector};
use crate::git::finder;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Sends `TimerFired` immediately and then once per interval.
pub async fn start_refresh_timer(tx: mpsc::UnboundedSender<AppEvent>, interval_ms: u64) {
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if tx.send(AppEvent::TimerFired).is_err() {
            break;
        }
    }
}

/// Launches the two halves of a refresh cycle. Nothing is cancelled or
/// de-duplicated: every cycle reports back on its own.
#[derive(Debug, Clone)]
pub struct Refresher {
    root: PathBuf,
    max_depth: usize,
    collector: StatusCollector,
}

impl Refresher {
    pub fn new(root: PathBuf, max_depth: usize, collector: StatusCollector) -> Self {
        Self {
            root,
            max_depth,
            collector,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.root_dir.clone(),
            config.max_depth,
            StatusCollector::from_config(config),
        )
    }

    pub fn spawn(&self, refresh: RefreshId, tx: &mpsc::UnboundedSender<AppEvent>) {
        debug!(
            refresh,
            root = %self.root.display(),
            routine = ?self.collector.routine(),
            "refresh spawned"
        );

        let walk_tx = tx.clone();
        let root = self.root.clone();
        let max_depth = self.max_depth;
        tokio::spawn(async move {
            let result = finder::find_async(root, max_depth).await;
            let _ = walk_tx.send(AppEvent::ReposFound { refresh, result });
        });

        tokio::spawn(run_collection(
            refresh,
            self.collector.clone(),
            self.root.clone(),
            tx.clone(),
        ));
    }
}

/// Buffers stdout until the stream closes and forwards stderr right away.
pub async fn run_collection(
    refresh: RefreshId,
    collector: StatusCollector,
    root: PathBuf,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    let mut stream = match collector.collect(&root) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = tx.send(AppEvent::CollectorFailed {
                refresh,
                error: e.to_string(),
            });
            return;
        }
    };

    let mut buffer = Vec::new();
    while let Some(event) = stream.recv().await {
        let app_event = match event {
            CollectorEvent::Stdout(chunk) => {
                buffer.extend_from_slice(&chunk);
                continue;
            }
            CollectorEvent::Stderr(chunk) => AppEvent::CollectorStderr { refresh, chunk },
            CollectorEvent::Closed => AppEvent::CollectorClosed {
                refresh,
                output: String::from_utf8_lossy(&std::mem::take(&mut buffer)).into_owned(),
            },
        };
        if tx.send(app_event).is_err() {
            break;
        }
    }
}
