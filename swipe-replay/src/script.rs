//! Replay scripts: a scene plus a timeline of input steps.

use std::path::Path;

use serde::{Deserialize, Serialize};
use swipe_core::{PointerEvent, Rect, ScrollState, SwipeConfig};

use crate::error::ReplayResult;

/// Which recognizer the script drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A single card: the first row.
    View,
    /// A list of rows, hit-tested on press.
    List,
}

/// One step of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Deliver a pointer event. Time first advances to its timestamp.
    Pointer(PointerEvent),
    /// Let animations run for a while.
    Advance {
        /// Milliseconds to advance.
        ms: u64,
    },
    /// Forward a list scroll-state change.
    Scroll {
        /// New scroll state.
        state: ScrollState,
    },
    /// Resume watching for swipes.
    Enable,
    /// Pause watching for swipes.
    Disable,
}

/// A scene and the input to replay against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Recognizer to drive.
    pub mode: Mode,
    /// Gesture thresholds; defaults (scaled by `--density`) when absent.
    #[serde(default)]
    pub config: Option<SwipeConfig>,
    /// Container bounds on screen. Derived from the rows when empty.
    #[serde(default)]
    pub container: Rect,
    /// Row bounds in container coordinates; the index is the position.
    pub rows: Vec<Rect>,
    /// Positions that refuse to be dismissed.
    #[serde(default)]
    pub locked: Vec<usize>,
    /// Input timeline.
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a script.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The configuration to run with: the script's own, else the defaults
    /// for `density`.
    #[must_use]
    pub fn resolve_config(&self, density: Option<f32>) -> SwipeConfig {
        self.config
            .unwrap_or_else(|| density.map_or_else(SwipeConfig::default, SwipeConfig::for_density))
    }
}
