pub mod checklist;
pub mod compliance;
pub mod dashboard;
pub mod log;
pub mod notify;
pub mod period;
pub mod reminder;
pub mod schedule;
pub mod store;
pub mod upload;
pub mod users;
