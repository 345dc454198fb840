pub mod add;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod stats;
pub mod threshold;
pub mod user;
pub mod watch;
