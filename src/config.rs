//! External configuration loader.
//!
//! Reads `config.toml` from the executable's directory, the CWD, or the XDG
//! config directory. Missing file or missing keys fall back to defaults.
//! Board size, tick rate and scoring are fixed and not read from here.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub gamepad: GamepadConfig,
    pub log: LogConfig,
    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub restart: Vec<String>,
    pub menu: Vec<String>,
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    /// `None` disables logging.
    pub file: Option<PathBuf>,
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_restart")]
    restart: Vec<String>,
    #[serde(default = "default_menu")]
    menu: Vec<String>,
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_file")]
    file: String,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_restart() -> Vec<String> { vec!["Y".into()] }
fn default_menu() -> Vec<String> { vec!["Start".into()] }
fn default_confirm() -> Vec<String> { vec!["A".into()] }
fn default_cancel() -> Vec<String> { vec!["B".into(), "Select".into()] }
fn default_log_file() -> String { "snake.log".into() }
fn default_log_level() -> String { "info".into() }

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            restart: default_restart(),
            menu: default_menu(),
            confirm: default_confirm(),
            cancel: default_cancel(),
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

// ── Loading ──

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default(), None)
    }
}

impl GameConfig {
    /// Load config from the first `config.toml` found.
    /// No file at all is not an error: defaults are returned.
    pub fn load() -> Result<Self, ConfigError> {
        match candidate_dirs().iter().map(|d| d.join(CONFIG_FILE)).find(|p| p.is_file()) {
            Some(path) => Self::load_from(&path),
            None => Ok(GameConfig::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = toml::from_str::<TomlConfig>(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(GameConfig::from_toml(parsed, Some(path.to_path_buf())))
    }

    fn from_toml(cfg: TomlConfig, source: Option<PathBuf>) -> Self {
        let file = cfg.log.file.trim();
        GameConfig {
            gamepad: GamepadConfig {
                restart: cfg.gamepad.restart,
                menu: cfg.gamepad.menu,
                confirm: cfg.gamepad.confirm,
                cancel: cfg.gamepad.cancel,
            },
            log: LogConfig {
                file: if file.is_empty() { None } else { Some(PathBuf::from(file)) },
                level: cfg.log.level,
            },
            source,
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG config (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    let xdg = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")));
    if let Some(base) = xdg {
        let dir = base.join("snake");
        if dir.is_dir() && !dirs.iter().any(|d| d == &dir) {
            dirs.push(dir);
        }
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> GameConfig {
        GameConfig::from_toml(toml::from_str(text).unwrap(), None)
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse("");
        assert_eq!(cfg.gamepad.menu, vec!["Start".to_string()]);
        assert_eq!(cfg.gamepad.cancel, vec!["B".to_string(), "Select".to_string()]);
        assert_eq!(cfg.log.file, Some(PathBuf::from("snake.log")));
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse(
            r#"
            [gamepad]
            restart = ["X", "R1"]

            [log]
            level = "debug"
            "#,
        );
        assert_eq!(cfg.gamepad.restart, vec!["X".to_string(), "R1".to_string()]);
        assert_eq!(cfg.gamepad.confirm, vec!["A".to_string()]);
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.log.file, Some(PathBuf::from("snake.log")));
    }

    #[test]
    fn blank_log_file_disables_logging() {
        let cfg = parse("[log]\nfile = \"  \"\n");
        assert_eq!(cfg.log.file, None);
    }

    #[test]
    fn bad_file_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("snake-config-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[log\nfile = 3").unwrap();
        let err = GameConfig::load_from(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let err = GameConfig::load_from(Path::new("/nonexistent/snake/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
