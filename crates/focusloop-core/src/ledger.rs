//! Daily completion ledger.
//!
//! Durable count of focus phases finished on the current local calendar
//! day, persisted as `{completedToday, lastDate}` under the `pomodoro-data`
//! key. The record rolls over before any other logic runs: on every read
//! or write, a `lastDate` that no longer matches today resets the count.

use chrono::{Local, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::storage::KvStore;

/// KV key the daily record lives under.
pub const DAILY_KEY: &str = "pomodoro-data";

/// Provides the current local calendar date. Swappable for tests.
pub trait DateSource: Send + 'static {
    fn today(&self) -> NaiveDate;
}

/// [`DateSource`] backed by the system clock.
pub struct SystemDate;

impl DateSource for SystemDate {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Persisted shape: `lastDate` is the local date (`YYYY-MM-DD`) on which
/// `completedToday` was last incremented or checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "completedToday")]
    pub completed_today: u32,
    #[serde(rename = "lastDate")]
    pub last_date: String,
}

/// Day-scoped focus completion counter over a [`KvStore`].
///
/// The in-process record is authoritative once loaded; every change is
/// written through to the store fire-and-forget, so a write failure
/// cannot corrupt the session cadence.
pub struct DailyLedger<S: KvStore, D: DateSource = SystemDate> {
    store: S,
    dates: D,
    record: Option<DailyRecord>,
}

impl<S: KvStore> DailyLedger<S> {
    pub fn new(store: S) -> Self {
        Self::with_dates(store, SystemDate)
    }
}

impl<S: KvStore, D: DateSource> DailyLedger<S, D> {
    pub fn with_dates(store: S, dates: D) -> Self {
        Self {
            store,
            dates,
            record: None,
        }
    }

    /// Record one completed focus phase and return the new count.
    ///
    /// Must be called exactly once per completed focus phase; the returned
    /// count drives the short/long break cadence.
    pub fn record_focus_completion(&mut self) -> u32 {
        let record = self.current();
        record.completed_today += 1;
        let snapshot = record.clone();
        self.persist(&snapshot);
        snapshot.completed_today
    }

    /// Today's completion count, for display. Applies the rollover check
    /// but never increments.
    pub fn completed_today(&mut self) -> u32 {
        self.current().completed_today
    }

    /// The record after the rollover check, for display.
    pub fn record(&mut self) -> DailyRecord {
        self.current().clone()
    }

    /// Load (if needed) and roll over the record, returning it mutably.
    fn current(&mut self) -> &mut DailyRecord {
        let today = self.dates.today().format("%Y-%m-%d").to_string();
        let mut record = match self.record.take() {
            Some(record) => record,
            None => match self.store.get_json::<DailyRecord>(DAILY_KEY) {
                Some(record) => record,
                None => {
                    // First run: create the record with today's date.
                    let record = DailyRecord {
                        completed_today: 0,
                        last_date: today.clone(),
                    };
                    self.persist(&record);
                    record
                }
            },
        };
        if record.last_date != today {
            record = DailyRecord {
                completed_today: 0,
                last_date: today,
            };
            self.persist(&record);
        }
        self.record.insert(record)
    }

    fn persist(&self, record: &DailyRecord) {
        if let Err(e) = self.store.set_json(DAILY_KEY, record) {
            warn!("daily record write failed, keeping in-memory count: {e}");
        }
    }
}
