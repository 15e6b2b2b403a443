use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the engine produces an Event.
/// The CLI prints them; embeddings subscribe to them via the runner channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero. The next phase is already loaded, paused.
    PhaseCompleted {
        phase: Phase,
        completed_today: u32,
        next_phase: Phase,
        next_duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        remaining_secs: u64,
        duration_secs: u64,
        running: bool,
        /// 1.0 at phase start, 0.0 at phase end.
        progress: f64,
        completed_today: u32,
        at: DateTime<Utc>,
    },
}
