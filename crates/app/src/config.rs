//! Runtime configuration for the flashdeck binary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "FLASHDECK_CONFIG";
pub const DATA_ENV: &str = "FLASHDECK_DATA";

const APP_NAME: &str = "flashdeck";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON snapshot holding every deck.
    pub data_file: PathBuf,
    /// Default `env_logger` filter; `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Save after every command that changes the decks.
    pub autosave: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: "warn".to_string(),
            autosave: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Build the configuration from defaults, a config file and the environment.
    ///
    /// `explicit` is the `--config` flag. Without it, `FLASHDECK_CONFIG` is used,
    /// then the platform config file if it exists. `env` looks up variables so
    /// callers can substitute the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a named config file cannot be read or parsed.
    pub fn resolve(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let config = match named {
            Some(path) => Self::load_file(&path)?,
            None => match default_config_file().filter(|p| p.is_file()) {
                Some(path) => Self::load_file(&path)?,
                None => Self::default(),
            },
        };

        Ok(config.with_env(env))
    }

    /// Read and parse a TOML config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` or `ConfigError::Parse`.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_env(mut self, env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(data) = env(DATA_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_file = PathBuf::from(data);
        }
        self
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

fn default_data_file() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("flashdeck.json"),
        |d| d.data_dir().join("decks.json"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "autosave = false\n").unwrap();

        let config = Config::load_file(&path).unwrap();
        assert!(!config.autosave);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.data_file, Config::default().data_file);
    }

    #[test]
    fn env_config_path_and_data_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashdeck.toml");
        std::fs::write(&path, "data_file = \"from-file.json\"\nlog_level = \"debug\"\n").unwrap();
        let path_str = path.to_string_lossy().into_owned();

        let config = Config::resolve(None, env_of(&[(CONFIG_ENV, path_str.as_str())])).unwrap();
        assert_eq!(config.data_file, PathBuf::from("from-file.json"));
        assert_eq!(config.log_level, "debug");

        let config = Config::resolve(
            Some(&path),
            env_of(&[(DATA_ENV, "from-env.json")]),
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("from-env.json"));
    }

    #[test]
    fn broken_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "autosave = \"sometimes\"").unwrap();
        let err = Config::resolve(Some(&path), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let missing = dir.path().join("missing.toml");
        let err = Config::resolve(Some(&missing), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
