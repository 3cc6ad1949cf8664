pub mod cadence;
pub mod metric;
pub mod record;
pub mod role;
pub mod user;
