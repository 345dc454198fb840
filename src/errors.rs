//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// A log, roster or event source could not be read.
    #[error("Failed to fetch {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid entry type: {0} (expected 'in' or 'out')")]
    InvalidEntryType(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Invalid range: start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },

    #[error("{0}")]
    PermissionDenied(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Time-in at {time} is outside the allowed window {start}-{end}")]
    OutsideTimeWindow {
        time: String,
        start: String,
        end: String,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    pub fn fetch(source_name: &str, reason: impl ToString) -> Self {
        AppError::Fetch {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn admin_only() -> Self {
        AppError::PermissionDenied("Only administrators can modify this setting".to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
