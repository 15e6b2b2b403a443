//! # Focusloop Core Library
//!
//! Core business logic for the Focusloop Pomodoro timer. The CLI binary is
//! a thin layer over this library; any other embedding (GUI shell, daemon)
//! drives the same engine.
//!
//! ## Architecture
//!
//! - **Session Clock**: a caller-ticked countdown state machine -- one
//!   `tick()` is one elapsed second, no internal thread
//! - **Phase Policy**: pure mapping from a completed phase and today's
//!   focus count to the next phase (every 4th focus earns the long break)
//! - **Daily Ledger**: durable focus-completion count with local
//!   calendar-day rollover
//! - **Runner**: the single cancellable tokio ticker task per engine,
//!   with chime playback on completion
//! - **Storage**: string-keyed JSON blob store; SQLite-backed by default
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: synchronous composition of clock, policy, ledger
//! - [`SessionRunner`]: async wrapper supplying the per-second cadence
//! - [`Database`]: durable key-value store
//! - [`TimerSettings`]: user-configurable phase durations

pub mod audio;
pub mod error;
pub mod events;
pub mod ledger;
pub mod storage;
pub mod timer;

pub use audio::{Chime, Notifier};
pub use error::{ConfigError, CoreError, Result, StorageError};
pub use events::Event;
pub use ledger::{DailyLedger, DailyRecord, DateSource, SystemDate, DAILY_KEY};
pub use storage::{Database, KvStore, MemoryStore, TimerSettings, SETTINGS_KEY};
pub use timer::{Phase, SessionClock, SessionEngine, SessionRunner, Tick, Transition};
