//! Reconciliation core shared by every surface (list, stats, dashboard,
//! export, watch). Functions here are pure over a snapshot of entries.

pub mod classifier;
pub mod event_status;
pub mod logic;
pub mod pairing;
pub mod range;
pub mod stats;
pub mod watch;
