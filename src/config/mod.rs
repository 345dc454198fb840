use crate::errors::{AppError, AppResult};
use crate::models::thresholds::{
    DEFAULT_LATE_THRESHOLD, DEFAULT_WINDOW_END, DEFAULT_WINDOW_START, ThresholdConfig,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Seed for the late threshold stored at `init` (HH:MM).
    #[serde(default = "default_late_threshold")]
    pub late_threshold: String,
    #[serde(default = "default_window_start")]
    pub time_window_start: String,
    #[serde(default = "default_window_end")]
    pub time_window_end: String,
    /// Poll interval of `watch`, in milliseconds.
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,
    /// tracing filter used when RATTENDLOG_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_late_threshold() -> String {
    DEFAULT_LATE_THRESHOLD.to_string()
}
fn default_window_start() -> String {
    DEFAULT_WINDOW_START.to_string()
}
fn default_window_end() -> String {
    DEFAULT_WINDOW_END.to_string()
}
fn default_watch_interval() -> u64 {
    2000
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            late_threshold: default_late_threshold(),
            time_window_start: default_window_start(),
            time_window_end: default_window_end(),
            watch_interval_ms: default_watch_interval(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rattendlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Threshold seed described by this file.
    pub fn thresholds(&self) -> AppResult<ThresholdConfig> {
        ThresholdConfig::from_strings(
            &self.late_threshold,
            &self.time_window_start,
            &self.time_window_end,
        )
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("rattendlog.sqlite"),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if !db_path.exists() {
            fs::File::create(&db_path).map_err(|e| {
                AppError::from(io::Error::new(e.kind(), format!("{}: {e}", db_path.display())))
            })?;
        }

        Ok(config.database)
    }
}
