//! Session clock: the per-phase countdown state machine.
//!
//! The clock is caller-ticked -- it holds no thread and no wall-clock
//! anchor. One `tick()` is one elapsed second; the async runner supplies
//! the real-time cadence.

use crate::storage::TimerSettings;

use super::Phase;

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Clock is not running; nothing happened.
    Idle,
    /// One second elapsed, countdown continues.
    Running,
    /// The countdown reached zero; the named phase just completed and the
    /// clock stopped itself.
    Completed(Phase),
}

/// Countdown state for the active phase.
///
/// Never persisted: a fresh construction always begins at a paused Focus
/// phase at full duration.
#[derive(Debug, Clone)]
pub struct SessionClock {
    phase: Phase,
    /// Configured duration (seconds) of the current phase.
    duration_secs: u64,
    remaining_secs: u64,
    running: bool,
}

impl SessionClock {
    pub fn new(settings: &TimerSettings) -> Self {
        let duration_secs = settings.focus_secs();
        Self {
            phase: Phase::Focus,
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whole minutes left on the display.
    pub fn minutes(&self) -> u64 {
        self.remaining_secs / 60
    }

    /// Seconds-within-minute left on the display.
    pub fn seconds(&self) -> u64 {
        self.remaining_secs % 60
    }

    /// 1.0 at phase start, 0.0 at phase end.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.remaining_secs as f64 / self.duration_secs as f64
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop the countdown in place. Idempotent; returns false if already
    /// paused.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Back to a paused Focus phase at full duration.
    pub fn reset(&mut self, settings: &TimerSettings) {
        *self = Self::new(settings);
    }

    /// Install the next phase, paused. The user must start it explicitly;
    /// the pause is the acknowledgement of the phase change.
    pub fn load(&mut self, phase: Phase, duration_secs: u64) {
        self.phase = phase;
        self.duration_secs = duration_secs;
        self.remaining_secs = duration_secs;
        self.running = false;
    }

    /// Advance one second. On reaching exactly zero the clock stops itself
    /// and reports the completed phase -- once per zero-crossing.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return Tick::Completed(self.phase);
        }
        Tick::Running
    }
}
