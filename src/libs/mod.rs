//! Core library modules for the kairos application.
//!
//! Serves as the main entry point for all kairos library components,
//! providing a centralized access point to the application's core
//! functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Session Tracking**: Start/pause/resume/stop state machine with
//!   pause-excluded elapsed time
//! - **Background Ticking**: Periodic elapsed-time updates with bounded
//!   failure escalation
//! - **Event Delivery**: Isolated listener dispatch with eviction
//! - **Crash Recovery**: Best-effort session and history backups

pub mod activity;
pub mod backup;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod listener;
pub mod messages;
pub mod ticker;
pub mod time_entry;
pub mod tracker;
pub mod view;
