//! Session engine: the composition root for one timer instance.
//!
//! Ties the caller-ticked [`SessionClock`] to the transition policy and the
//! daily ledger. The engine is synchronous; the async runner supplies the
//! once-per-second cadence and the chime side effect.
//!
//! ## Completion flow
//!
//! ```text
//! tick() reaches zero
//!   -> focus? ledger.record_focus_completion()
//!   -> Transition::after(...) picks the next phase
//!   -> clock.load(next, duration)   (paused; user must start again)
//!   -> Event::PhaseCompleted
//! ```

use chrono::Utc;
use log::info;

use crate::events::Event;
use crate::ledger::{DailyLedger, DateSource, SystemDate};
use crate::storage::{KvStore, TimerSettings};

use super::clock::{SessionClock, Tick};
use super::phase::Transition;

pub struct SessionEngine<S: KvStore, D: DateSource = SystemDate> {
    clock: SessionClock,
    ledger: DailyLedger<S, D>,
    settings: TimerSettings,
}

impl<S: KvStore> SessionEngine<S> {
    /// Build an engine over the store: settings are loaded (or defaulted)
    /// from it, and the daily ledger persists into it.
    pub fn new(store: S) -> Self {
        let settings = TimerSettings::load(&store);
        Self {
            clock: SessionClock::new(&settings),
            ledger: DailyLedger::new(store),
            settings,
        }
    }
}

impl<S: KvStore, D: DateSource> SessionEngine<S, D> {
    pub fn with_dates(store: S, dates: D) -> Self {
        let settings = TimerSettings::load(&store);
        Self {
            clock: SessionClock::new(&settings),
            ledger: DailyLedger::with_dates(store, dates),
            settings,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn completed_today(&mut self) -> u32 {
        self.ledger.completed_today()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&mut self) -> Event {
        Event::StateSnapshot {
            phase: self.clock.phase(),
            remaining_secs: self.clock.remaining_secs(),
            duration_secs: self.clock.duration_secs(),
            running: self.clock.is_running(),
            progress: self.clock.progress(),
            completed_today: self.ledger.completed_today(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if !self.clock.start() {
            return None; // Already running.
        }
        Some(Event::TimerStarted {
            phase: self.clock.phase(),
            duration_secs: self.clock.duration_secs(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.clock.pause() {
            return None;
        }
        Some(Event::TimerPaused {
            phase: self.clock.phase(),
            remaining_secs: self.clock.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Back to a paused Focus phase at full duration. The daily ledger is
    /// untouched.
    pub fn reset(&mut self) -> Event {
        self.clock.reset(&self.settings);
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance one second. Returns `Some(Event::PhaseCompleted)` when the
    /// current phase runs down; the next phase is loaded paused before the
    /// event is returned.
    pub fn tick(&mut self) -> Option<Event> {
        match self.clock.tick() {
            Tick::Completed(phase) => {
                let completed_today = if phase.is_focus() {
                    self.ledger.record_focus_completion()
                } else {
                    self.ledger.completed_today()
                };
                let transition = Transition::after(phase, completed_today, &self.settings);
                self.clock.load(transition.next, transition.duration_secs);
                info!(
                    "{} completed ({} focus today), next: {}",
                    phase.label(),
                    completed_today,
                    transition.next.label()
                );
                Some(Event::PhaseCompleted {
                    phase,
                    completed_today,
                    next_phase: transition.next,
                    next_duration_secs: transition.duration_secs,
                    at: Utc::now(),
                })
            }
            Tick::Running | Tick::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::timer::Phase;

    fn engine() -> SessionEngine<MemoryStore> {
        SessionEngine::new(MemoryStore::new())
    }

    fn run_to_completion<S: KvStore, D: DateSource>(engine: &mut SessionEngine<S, D>) -> Event {
        engine.start();
        loop {
            if let Some(event) = engine.tick() {
                return event;
            }
        }
    }

    #[test]
    fn focus_completion_increments_ledger_and_loads_short_break() {
        let mut engine = engine();
        let event = run_to_completion(&mut engine);
        match event {
            Event::PhaseCompleted {
                phase,
                completed_today,
                next_phase,
                next_duration_secs,
                ..
            } => {
                assert_eq!(phase, Phase::Focus);
                assert_eq!(completed_today, 1);
                assert_eq!(next_phase, Phase::ShortBreak);
                assert_eq!(next_duration_secs, 300);
            }
            other => panic!("expected PhaseCompleted, got {other:?}"),
        }
        assert!(!engine.clock().is_running());
        assert_eq!(engine.clock().remaining_secs(), 300);
    }

    #[test]
    fn break_completion_leaves_ledger_alone() {
        let mut engine = engine();
        run_to_completion(&mut engine); // focus -> short break
        let event = run_to_completion(&mut engine); // short break -> focus
        match event {
            Event::PhaseCompleted {
                phase,
                completed_today,
                next_phase,
                ..
            } => {
                assert_eq!(phase, Phase::ShortBreak);
                assert_eq!(completed_today, 1);
                assert_eq!(next_phase, Phase::Focus);
            }
            other => panic!("expected PhaseCompleted, got {other:?}"),
        }
    }

    #[test]
    fn double_start_yields_single_completion() {
        let mut engine = engine();
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        let mut completions = 0;
        for _ in 0..engine.settings().focus_secs() + 10 {
            if engine.tick().is_some() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    #[test]
    fn pause_freezes_countdown() {
        let mut engine = engine();
        engine.start();
        engine.tick();
        assert!(engine.pause().is_some());
        assert!(engine.pause().is_none());
        let remaining = engine.clock().remaining_secs();
        engine.tick();
        assert_eq!(engine.clock().remaining_secs(), remaining);
    }

    #[test]
    fn reset_does_not_touch_ledger() {
        let mut engine = engine();
        run_to_completion(&mut engine);
        engine.reset();
        assert_eq!(engine.clock().phase(), Phase::Focus);
        assert_eq!(engine.clock().remaining_secs(), 1500);
        assert_eq!(engine.completed_today(), 1);
    }

    #[test]
    fn snapshot_reflects_fresh_state() {
        let mut engine = engine();
        match engine.snapshot() {
            Event::StateSnapshot {
                phase,
                remaining_secs,
                running,
                progress,
                completed_today,
                ..
            } => {
                assert_eq!(phase, Phase::Focus);
                assert_eq!(remaining_secs, 1500);
                assert!(!running);
                assert_eq!(progress, 1.0);
                assert_eq!(completed_today, 0);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}
