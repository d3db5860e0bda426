//! # Kairos - Activity Time Tracking
//!
//! A command-line utility for tracking time spent on activities, with
//! pause-aware sessions, live elapsed-time ticking and crash recovery.
//!
//! ## Features
//!
//! - **Session Tracking**: Start, pause, resume and stop sessions; elapsed
//!   time excludes paused intervals
//! - **Background Ticking**: Roughly once-per-second updates with bounded
//!   failure escalation
//! - **Event Listeners**: Observers with panic isolation and eviction
//! - **Crash Recovery**: Best-effort backups of the in-flight session and
//!   the completed history
//! - **Report Generation**: Daily reports with per-activity totals
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kairos::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
