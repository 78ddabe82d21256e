mod app;
mod config;
mod error;
mod event;
mod git;
mod scheduler;
#[cfg(test)]
mod test_utils;
mod ui;

use app::{App, Command};
use clap::Parser;
use config::Config;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::AppEvent;
use futures::StreamExt;
use scheduler::Refresher;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "git-terminal",
    version,
    about = "Dashboard of branch and remote sync status for every git repository under a directory"
)]
struct Cli {
    #[arg(help = "Directory to scan (defaults to the current directory)")]
    root: Option<PathBuf>,
}

type MainResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn main() -> MainResult {
    let cli = Cli::parse();
    let runtime = build_runtime()?;
    let result = runtime.block_on(run(cli));
    // a walk stuck on a slow filesystem must not hold the process open after quit
    runtime.shutdown_background();
    result
}

// one thread drives input, timers and process I/O; only the loop below mutates `App`
fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

async fn run(cli: Cli) -> MainResult {
    let config = Config::load(cli.root);
    init_tracing(&config)?;

    let refresher = Refresher::from_config(&config);
    let refresh_interval_ms = config.refresh_interval_ms();
    let mut app = App::new(config);

    // Install panic hook before entering raw mode so terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(_, _) => Some(AppEvent::Resize),
                _ => None,
            };
            if let Some(e) = app_event {
                if input_tx.send(e).is_err() {
                    break;
                }
            }
        }
    });

    let timer = tokio::spawn(scheduler::start_refresh_timer(
        tx.clone(),
        refresh_interval_ms,
    ));

    loop {
        terminal.draw(|f| app.render(f))?;
        app.rendered();

        let first = match rx.recv().await {
            Some(e) => e,
            None => break,
        };

        process_event(&mut app, first, &refresher, &tx);
        while let Ok(pending) = rx.try_recv() {
            process_event(&mut app, pending, &refresher, &tx);
        }

        if app.should_quit {
            break;
        }
    }

    timer.abort();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn process_event(
    app: &mut App,
    event: AppEvent,
    refresher: &Refresher,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    if app.should_quit {
        return;
    }
    if let Some(Command::Refresh(id)) = app.handle_event(event) {
        refresher.spawn(id, tx);
    }
}

/// The dashboard owns the terminal, so tracing only goes to a file when one is configured.
fn init_tracing(config: &Config) -> std::io::Result<()> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(());
    };

    let log_file = std::fs::File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn shutdown_does_not_wait_for_running_walks() {
        let runtime = build_runtime().unwrap();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        runtime.block_on(async {
            let (started_tx, started_rx) = tokio::sync::oneshot::channel();
            tokio::task::spawn_blocking(move || {
                let _ = started_tx.send(());
                let _ = release_rx.recv_timeout(Duration::from_secs(30));
            });
            started_rx.await.unwrap();
        });

        let started = Instant::now();
        runtime.shutdown_background();
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(release_tx);
    }
}
