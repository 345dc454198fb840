pub mod entry_type;
pub mod log_entry;
pub mod pairing;
pub mod scheduled_event;
pub mod stats;
pub mod status;
pub mod thresholds;
pub mod user;
