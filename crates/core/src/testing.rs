//! Test doubles for the engine's collaborators.
//!
//! Used by the unit tests in this crate, the workspace integration tests and
//! the benchmarks.

use std::time::Duration;

use crate::scoring::Scoring;
use crate::timer::Timer;

/// Timer that never fires on its own; records how it was driven
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTimer {
    started: bool,
    pub start_calls: u32,
    pub stop_calls: u32,
    pub last_interval: Option<Duration>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Timer for ManualTimer {
    fn start(&mut self, interval: Duration) {
        self.started = true;
        self.start_calls += 1;
        self.last_interval = Some(interval);
    }

    fn stop(&mut self) {
        self.started = false;
        self.stop_calls += 1;
    }

    fn is_started(&self) -> bool {
        self.started
    }
}

/// Scoring that counts notifications and reports a configurable level change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingScoring {
    pub new_pieces: u32,
    pub completed_line_calls: u32,
    pub last_completed_lines: Option<u32>,
    pub perfect_clears: u32,
    pub soft_drops: u32,
    /// Returned from the next `on_completed_lines` calls
    pub change_level: bool,
    pub interval: Duration,
}

impl RecordingScoring {
    pub fn new() -> Self {
        Self {
            new_pieces: 0,
            completed_line_calls: 0,
            last_completed_lines: None,
            perfect_clears: 0,
            soft_drops: 0,
            change_level: false,
            interval: Duration::from_secs(1),
        }
    }
}

impl Default for RecordingScoring {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoring for RecordingScoring {
    fn on_new_piece(&mut self) {
        self.new_pieces += 1;
    }

    fn on_completed_lines(&mut self, lines: u32) -> bool {
        self.completed_line_calls += 1;
        self.last_completed_lines = Some(lines);
        self.change_level
    }

    fn on_perfect_clear(&mut self) {
        self.perfect_clears += 1;
    }

    fn on_soft_drop(&mut self) {
        self.soft_drops += 1;
    }

    fn score(&self) -> u32 {
        0
    }

    fn level(&self) -> u32 {
        1
    }

    fn completed_lines(&self) -> u32 {
        0
    }

    fn drop_interval(&self, _level: Option<u32>) -> Duration {
        self.interval
    }
}
