use crate::git::finder::DEFAULT_MAX_DEPTH;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 300_000;
pub const MIN_REFRESH_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub root_dir: PathBuf,
    pub max_depth: usize,
    pub refresh_interval_ms: u64,
    /// Replaces the bundled status script; receives the root as `$1`.
    #[serde(default)]
    pub status_command: Option<String>,
    #[serde(default)]
    pub fetch_remotes: bool,
    pub log_capacity: usize,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            max_depth: DEFAULT_MAX_DEPTH,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            status_command: None,
            fetch_remotes: false,
            log_capacity: 500,
            log_file: None,
        }
    }
}

impl Config {
    pub fn load(cli_root: Option<PathBuf>) -> Self {
        let config_file = config_dir().join("git-terminal").join("config.toml");
        let mut config = Self::load_from(&config_file, cli_root);
        config.root_dir = resolve_root(&config.root_dir);
        config
    }

    fn load_from(config_file: &Path, cli_root: Option<PathBuf>) -> Self {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(config_file));
        }

        figment = figment.merge(Env::prefixed("GIT_TERMINAL_"));

        if let Some(path) = &cli_root {
            figment = figment.merge(Serialized::default("root_dir", path));
        }

        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: config parse error, using defaults: {e}");
                let defaults = Config::default();
                Config {
                    root_dir: cli_root.unwrap_or(defaults.root_dir),
                    ..Config::default()
                }
            }
        }
    }

    pub fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms.max(MIN_REFRESH_INTERVAL_MS)
    }
}

fn resolve_root(root: &Path) -> PathBuf {
    if root.as_os_str().is_empty() || root == Path::new(".") {
        std::env::current_dir().unwrap_or_else(|_| root.to_path_buf())
    } else {
        root.to_path_buf()
    }
}

pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
