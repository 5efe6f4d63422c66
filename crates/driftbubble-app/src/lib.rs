//! DriftBubble Application
//!
//! Headless shell around the core widget: replays scripted events against a
//! recording host and reports what the widget asked the host to do.

mod replay;

pub use replay::{Replay, ReplayError, ReplayResult, parse_script, run_script, run_script_file};
