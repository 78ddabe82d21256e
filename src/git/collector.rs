use crate::config::Config;
use crate::error::{GitTerminalError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

const BUNDLED_SCRIPT: &str = include_str!("../../scripts/git-helper.sh");
const CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorEvent {
    Stdout(Vec<u8>),
    Stderr(String),
    /// Stdout reached EOF.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusRoutine {
    Bundled,
    /// Shell snippet run with `sh -c`; the root directory is `$1`.
    Shell(String),
}

#[derive(Debug, Clone)]
pub struct StatusCollector {
    routine: StatusRoutine,
    max_depth: usize,
    fetch_remotes: bool,
}

impl StatusCollector {
    pub fn new(routine: StatusRoutine, max_depth: usize, fetch_remotes: bool) -> Self {
        Self {
            routine,
            max_depth,
            fetch_remotes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let routine = match config.status_command.as_deref() {
            Some(cmd) if !cmd.trim().is_empty() => StatusRoutine::Shell(cmd.to_string()),
            _ => StatusRoutine::Bundled,
        };
        Self::new(routine, config.max_depth, config.fetch_remotes)
    }

    pub fn routine(&self) -> &StatusRoutine {
        &self.routine
    }

    fn command(&self, root: &Path) -> Command {
        let script = match &self.routine {
            StatusRoutine::Bundled => BUNDLED_SCRIPT,
            StatusRoutine::Shell(cmd) => cmd.as_str(),
        };

        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(script)
            .arg("git-helper")
            .arg(root)
            .env("GIT_TERMINAL_MAX_DEPTH", self.max_depth.to_string())
            .env("GIT_TERMINAL_FETCH", if self.fetch_remotes { "1" } else { "0" })
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Starts the status routine for `root` and streams its output.
    ///
    /// Stdout and stderr are read on separate tasks, so stderr chunks arrive
    /// as soon as they are written and independently of `Closed`. The channel
    /// ends once both streams are drained and the child has been reaped.
    pub fn collect(&self, root: &Path) -> Result<mpsc::UnboundedReceiver<CollectorEvent>> {
        let mut child = self.command(root).spawn().map_err(|e| {
            GitTerminalError::Collection(format!("failed to start status routine: {e}"))
        })?;
        debug!(root = %root.display(), pid = ?child.id(), "status routine started");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| GitTerminalError::Collection("status routine has no stdout".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| GitTerminalError::Collection("status routine has no stderr".into()))?;

        let (tx, rx) = mpsc::unbounded_channel();

        let err_tx = tx.clone();
        tokio::spawn(async move {
            let mut pending = Vec::new();
            forward_chunks(stderr, |chunk| {
                let text = decode_utf8_prefix(&mut pending, &chunk);
                text.is_empty() || err_tx.send(CollectorEvent::Stderr(text)).is_ok()
            })
            .await;
            if !pending.is_empty() {
                let rest = String::from_utf8_lossy(&pending).into_owned();
                let _ = err_tx.send(CollectorEvent::Stderr(rest));
            }
        });

        tokio::spawn(async move {
            forward_chunks(stdout, |chunk| tx.send(CollectorEvent::Stdout(chunk)).is_ok()).await;
            let _ = tx.send(CollectorEvent::Closed);
            match child.wait().await {
                Ok(status) => debug!(%status, "status routine exited"),
                Err(e) => debug!(error = %e, "failed to reap status routine"),
            }
        });

        Ok(rx)
    }
}

/// Appends `chunk` to `pending` and decodes everything except a trailing
/// partial UTF-8 sequence, which stays in `pending` for the next chunk.
fn decode_utf8_prefix(pending: &mut Vec<u8>, chunk: &[u8]) -> String {
    pending.extend_from_slice(chunk);
    let complete = pending.len() - incomplete_tail_len(pending);
    let text = String::from_utf8_lossy(&pending[..complete]).into_owned();
    pending.drain(..complete);
    text
}

fn incomplete_tail_len(bytes: &[u8]) -> usize {
    let mut start = 0;
    loop {
        match std::str::from_utf8(&bytes[start..]) {
            Ok(_) => return 0,
            Err(e) => match e.error_len() {
                Some(invalid) => start += e.valid_up_to() + invalid,
                None => return bytes.len() - start - e.valid_up_to(),
            },
        }
    }
}

async fn forward_chunks<R, F>(mut reader: R, mut send: F)
where
    R: AsyncRead + Unpin,
    F: FnMut(Vec<u8>) -> bool,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if !send(buf[..n].to_vec()) {
                    break;
                }
            }
            Err(e) => {
                debug!(error = %e, "status routine stream read failed");
                break;
            }
        }
    }
}
