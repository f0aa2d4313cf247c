//! Timer protocol and a polling implementation.
//!
//! The engine only starts and stops its timer; ticks are delivered by whoever
//! drives the engine, as [`crate::game::Event::Tick`] into
//! [`crate::game::Game::handle`].

use std::time::{Duration, Instant};

/// A periodic timer controlled by the engine
pub trait Timer {
    /// Start ticking every `interval`. Starting a running timer resets its phase.
    fn start(&mut self, interval: Duration);

    fn stop(&mut self);

    fn is_started(&self) -> bool;
}

impl<T: Timer + ?Sized> Timer for Box<T> {
    fn start(&mut self, interval: Duration) {
        (**self).start(interval)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_started(&self) -> bool {
        (**self).is_started()
    }
}

/// Timer polled from a synchronous loop
#[derive(Debug, Clone)]
pub struct PollingTimer {
    started: bool,
    begin: Instant,
    period: Duration,
}

impl PollingTimer {
    pub fn new() -> Self {
        Self {
            started: false,
            begin: Instant::now(),
            period: Duration::ZERO,
        }
    }

    /// Returns true once per elapsed period while started
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// [`PollingTimer::poll`] against an explicit clock reading
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if !self.started {
            return false;
        }
        if now.saturating_duration_since(self.begin) >= self.period {
            self.begin = now;
            return true;
        }
        false
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next tick, zero when due or stopped
    pub fn remaining(&self) -> Duration {
        if !self.started {
            return Duration::ZERO;
        }
        self.period.saturating_sub(self.begin.elapsed())
    }
}

impl Default for PollingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for PollingTimer {
    fn start(&mut self, interval: Duration) {
        self.begin = Instant::now();
        self.period = interval;
        self.started = true;
    }

    fn stop(&mut self) {
        self.started = false;
    }

    fn is_started(&self) -> bool {
        self.started
    }
}
