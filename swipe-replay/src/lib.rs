//! # Swipe Replay
//!
//! Headless driver for the swipe recognizers. A script describes a scene
//! (a container and its rows) and a timeline of pointer events, scroll
//! changes and pauses. The replay runs it against a simulated host whose
//! animations advance on virtual time, then reports what was dismissed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p swipe-replay -- --script swipe-replay/scripts/list_batch.json --pretty
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `Script` - Scene and timeline loaded from JSON
//! - `SimulatedHost` - Rows, touch counters and a virtual-time animation engine
//! - `run` - Feeds the timeline to a recognizer and builds a `Report`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod host;
pub mod runner;
pub mod script;

pub use error::{ReplayError, ReplayResult};
pub use host::{SimRow, SimulatedHost, TouchStats};
pub use runner::{run, ReplayCallbacks, Report};
pub use script::{Mode, Script, Step};

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for swipe-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "swipe-replay")]
#[command(about = "Replay pointer scripts through the swipe-to-dismiss recognizers")]
#[command(version)]
pub struct CliArgs {
    /// Script to replay
    #[arg(long, env = "SWIPE_SCRIPT")]
    pub script: PathBuf,

    /// Display density used to scale the default thresholds
    #[arg(long, env = "SWIPE_DENSITY")]
    pub density: Option<f32>,

    /// Pretty-print the report
    #[arg(long)]
    pub pretty: bool,
}
