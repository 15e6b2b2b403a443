use serde::{Deserialize, Serialize};

use crate::storage::TimerSettings;

/// Current countdown mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_focus(self) -> bool {
        self == Phase::Focus
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Outcome of the phase transition policy: which phase follows a completed
/// one, and its configured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Phase,
    pub duration_secs: u64,
}

impl Transition {
    /// Pure policy mapping `(completed phase, completed-today count)` to
    /// the next phase.
    ///
    /// `completed_today` must already include the focus phase that just
    /// finished: every 4th focus completion earns the long break, the rest
    /// earn short breaks. Either break always hands back to focus.
    pub fn after(completed: Phase, completed_today: u32, settings: &TimerSettings) -> Self {
        match completed {
            Phase::Focus => {
                let next = if completed_today % 4 == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                Self {
                    next,
                    duration_secs: settings.duration_secs(next),
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Self {
                next: Phase::Focus,
                duration_secs: settings.duration_secs(Phase::Focus),
            },
        }
    }
}
