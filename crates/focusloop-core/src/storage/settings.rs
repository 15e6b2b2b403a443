//! User-configurable timer durations.
//!
//! Persisted as a JSON blob under the `pomodoro-settings` key; the field
//! names (`focusTime`, `shortBreakTime`, `longBreakTime`, all minutes) are
//! the wire contract shared with other embeddings of the store.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::timer::Phase;

use super::KvStore;

/// KV key the settings blob lives under.
pub const SETTINGS_KEY: &str = "pomodoro-settings";

/// Timer durations in minutes. All three are positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    #[serde(rename = "focusTime")]
    pub focus_minutes: u32,
    #[serde(rename = "shortBreakTime")]
    pub short_break_minutes: u32,
    #[serde(rename = "longBreakTime")]
    pub long_break_minutes: u32,
}

// Default functions
fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
        }
    }
}

impl TimerSettings {
    /// Load from the store, or return defaults on a missing/corrupt blob.
    ///
    /// A zero slipped into the persisted blob by another writer is coerced
    /// back to the documented default; a zero-length phase never reaches
    /// the clock.
    pub fn load<S: KvStore>(store: &S) -> Self {
        let mut settings: Self = store.get_json(SETTINGS_KEY).unwrap_or_default();
        settings.sanitize();
        settings
    }

    /// Persist to the store.
    ///
    /// # Errors
    /// Returns an error if the blob cannot be encoded or written.
    pub fn save<S: KvStore>(&self, store: &S) -> crate::Result<()> {
        store.set_json(SETTINGS_KEY, self)
    }

    fn sanitize(&mut self) {
        if self.focus_minutes < 1 {
            warn!("persisted focusTime invalid, using default");
            self.focus_minutes = default_focus_minutes();
        }
        if self.short_break_minutes < 1 {
            warn!("persisted shortBreakTime invalid, using default");
            self.short_break_minutes = default_short_break_minutes();
        }
        if self.long_break_minutes < 1 {
            warn!("persisted longBreakTime invalid, using default");
            self.long_break_minutes = default_long_break_minutes();
        }
    }

    /// Configured duration of a phase in seconds.
    pub fn duration_secs(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Focus => self.focus_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        };
        u64::from(minutes).saturating_mul(60)
    }

    pub fn focus_secs(&self) -> u64 {
        self.duration_secs(Phase::Focus)
    }

    /// Get a settings value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "focus_minutes" => Some(self.focus_minutes.to_string()),
            "short_break_minutes" => Some(self.short_break_minutes.to_string()),
            "long_break_minutes" => Some(self.long_break_minutes.to_string()),
            _ => None,
        }
    }

    /// Set a settings value by key.
    ///
    /// Non-numeric or non-positive input is rejected and the previous value
    /// retained -- an invalid duration is never stored.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    /// to a positive integer.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let minutes: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{value}' is not a whole number of minutes"),
        })?;
        if minutes < 1 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "duration must be at least 1 minute".to_string(),
            });
        }
        match key {
            "focus_minutes" => self.focus_minutes = minutes,
            "short_break_minutes" => self.short_break_minutes = minutes,
            "long_break_minutes" => self.long_break_minutes = minutes,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
