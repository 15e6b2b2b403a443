//! Async session runner: the one cancellable ticking source per engine.
//!
//! The engine is caller-ticked; this wrapper supplies the once-per-second
//! cadence from a single tokio task. Invariants enforced here:
//!
//! - at most one ticker task exists per runner; any prior handle is
//!   aborted before a new one is registered
//! - `pause()` and drop abort the ticker deterministically, so no orphaned
//!   tick can fire after the runner is gone
//! - on completion the ticker parks itself; the next phase stays paused
//!   until `start()` is called again

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use log::debug;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::audio::Notifier;
use crate::events::Event;
use crate::ledger::{DateSource, SystemDate};
use crate::storage::KvStore;

use super::engine::SessionEngine;

pub struct SessionRunner<S: KvStore + Send + 'static, D: DateSource = SystemDate> {
    engine: Arc<Mutex<SessionEngine<S, D>>>,
    notifier: Notifier,
    events: mpsc::UnboundedSender<Event>,
    ticker: StdMutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
}

impl<S: KvStore + Send + 'static, D: DateSource> SessionRunner<S, D> {
    /// Wrap an engine. Returns the runner and the receiving end of its
    /// event stream.
    pub fn new(
        engine: SessionEngine<S, D>,
        notifier: Notifier,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let runner = Self {
            engine: Arc::new(Mutex::new(engine)),
            notifier,
            events,
            ticker: StdMutex::new(None),
            tick_interval: Duration::from_secs(1),
        };
        (runner, rx)
    }

    /// Override the logical-second length (tests).
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Start (or resume) the countdown and the ticker task. A no-op when
    /// already running -- the live ticker is left alone, so re-entrant
    /// starts cannot double-tick.
    pub async fn start(&self) -> Option<Event> {
        let event = self.engine.lock().await.start()?;
        self.spawn_ticker();
        let _ = self.events.send(event.clone());
        Some(event)
    }

    /// Stop the countdown and cancel the ticker. Idempotent.
    pub async fn pause(&self) -> Option<Event> {
        self.cancel_ticker();
        let event = self.engine.lock().await.pause()?;
        let _ = self.events.send(event.clone());
        Some(event)
    }

    /// Cancel the ticker and return to a paused Focus phase.
    pub async fn reset(&self) -> Event {
        self.cancel_ticker();
        let event = self.engine.lock().await.reset();
        let _ = self.events.send(event.clone());
        event
    }

    pub async fn snapshot(&self) -> Event {
        self.engine.lock().await.snapshot()
    }

    pub async fn completed_today(&self) -> u32 {
        self.engine.lock().await.completed_today()
    }

    fn spawn_ticker(&self) {
        let mut guard = self.ticker.lock().unwrap_or_else(|e| e.into_inner());
        // Cancel any prior timer before registering a new one.
        if let Some(prior) = guard.take() {
            debug!("cancelling prior ticker");
            prior.abort();
        }

        let engine = self.engine.clone();
        let notifier = self.notifier.clone();
        let events = self.events.clone();
        let period = self.tick_interval;

        let handle = tokio::spawn(async move {
            // First tick fires one full period after start, not immediately.
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let completed = { engine.lock().await.tick() };
                if let Some(event) = completed {
                    notifier.chime();
                    let _ = events.send(event);
                    // Next phase is paused until start() is called again.
                    break;
                }
            }
            debug!("ticker parked");
        });

        *guard = Some(handle);
    }

    fn cancel_ticker(&self) {
        let mut guard = self.ticker.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = guard.take() {
            handle.abort();
        }
    }
}

impl<S: KvStore + Send + 'static, D: DateSource> Drop for SessionRunner<S, D> {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
