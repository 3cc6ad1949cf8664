//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
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

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Corrupted record payload: {0}")]
    Payload(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    #[error("Invalid field assignment '{0}' (expected KEY=VALUE)")]
    InvalidField(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Directory / upload errors
    // ---------------------------
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("User '{0}' is a viewer and cannot upload data")]
    NotAnUploader(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Email already registered to user '{user}': {email}")]
    DuplicateEmail { email: String, user: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
