//! Integration tests for the async session runner under paused tokio time.
//!
//! Time is virtual: sleeps auto-advance the clock, so a full 60-second
//! phase runs instantly and deterministically.

use std::time::Duration;

use focusloop_core::{
    Event, KvStore, MemoryStore, Notifier, Phase, SessionEngine, SessionRunner, SETTINGS_KEY,
};

/// Engine over a store configured with a 1-minute focus phase.
fn short_engine() -> SessionEngine<MemoryStore> {
    let store = MemoryStore::new();
    store
        .set_raw(
            SETTINGS_KEY,
            r#"{"focusTime":1,"shortBreakTime":5,"longBreakTime":15}"#,
        )
        .unwrap();
    SessionEngine::new(store)
}

fn remaining_of(event: &Event) -> u64 {
    match event {
        Event::StateSnapshot { remaining_secs, .. } => *remaining_secs,
        other => panic!("expected StateSnapshot, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn runner_completes_a_focus_phase() {
    let (runner, mut events) = SessionRunner::new(short_engine(), Notifier::silent());

    assert!(runner.start().await.is_some());
    tokio::time::sleep(Duration::from_secs(65)).await;

    let mut saw_completion = false;
    while let Ok(event) = events.try_recv() {
        if let Event::PhaseCompleted {
            phase,
            completed_today,
            next_phase,
            ..
        } = event
        {
            assert_eq!(phase, Phase::Focus);
            assert_eq!(completed_today, 1);
            assert_eq!(next_phase, Phase::ShortBreak);
            saw_completion = true;
        }
    }
    assert!(saw_completion);

    // Next phase is installed paused at full duration.
    match runner.snapshot().await {
        Event::StateSnapshot {
            phase,
            remaining_secs,
            running,
            ..
        } => {
            assert_eq!(phase, Phase::ShortBreak);
            assert_eq!(remaining_secs, 300);
            assert!(!running);
        }
        other => panic!("expected StateSnapshot, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn pause_cancels_the_ticker() {
    let (runner, mut events) = SessionRunner::new(short_engine(), Notifier::silent());

    runner.start().await;
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(runner.pause().await.is_some());

    let frozen = remaining_of(&runner.snapshot().await);
    assert!(frozen < 60);

    // No orphaned ticks: remaining stays frozen arbitrarily long.
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(remaining_of(&runner.snapshot().await), frozen);
    while let Ok(event) = events.try_recv() {
        assert!(!matches!(event, Event::PhaseCompleted { .. }));
    }

    // Second pause is a no-op.
    assert!(runner.pause().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn reentrant_start_does_not_double_tick() {
    let (runner, mut events) = SessionRunner::new(short_engine(), Notifier::silent());

    assert!(runner.start().await.is_some());
    tokio::time::sleep(Duration::from_secs(10)).await;
    // Already running: no second ticker may appear.
    assert!(runner.start().await.is_none());
    tokio::time::sleep(Duration::from_secs(10)).await;

    // ~20 elapsed seconds decremented once each, never twice.
    let remaining = remaining_of(&runner.snapshot().await);
    assert!((39..=41).contains(&remaining), "remaining = {remaining}");

    tokio::time::sleep(Duration::from_secs(60)).await;
    let completions = std::iter::from_fn(|| events.try_recv().ok())
        .filter(|event| matches!(event, Event::PhaseCompleted { .. }))
        .count();
    assert_eq!(completions, 1);
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_paused_focus() {
    let (runner, _events) = SessionRunner::new(short_engine(), Notifier::silent());

    runner.start().await;
    tokio::time::sleep(Duration::from_secs(10)).await;
    runner.reset().await;

    match runner.snapshot().await {
        Event::StateSnapshot {
            phase,
            remaining_secs,
            running,
            ..
        } => {
            assert_eq!(phase, Phase::Focus);
            assert_eq!(remaining_secs, 60);
            assert!(!running);
        }
        other => panic!("expected StateSnapshot, got {other:?}"),
    }

    // Ticker was cancelled with the reset.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(remaining_of(&runner.snapshot().await), 60);
}
