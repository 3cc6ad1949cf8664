pub mod check;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod export;
pub mod fields;
pub mod init;
pub mod log;
pub mod outbox;
pub mod remind;
pub mod schedule;
pub mod upload;
pub mod user;
