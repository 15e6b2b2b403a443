use std::io::{self, Write};
use std::time::Duration;

use clap::Subcommand;
use focusloop_core::storage::Database;
use focusloop_core::{Event, Notifier, Phase, SessionEngine, SessionRunner};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a foreground session (Ctrl-D to quit between phases)
    Run {
        /// Disable the completion chime
        #[arg(long)]
        mute: bool,
        /// Stop after this many completed phases
        #[arg(long)]
        phases: Option<u32>,
    },
    /// Print a fresh-session snapshot as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Status => {
            let db = Database::open()?;
            let mut engine = SessionEngine::new(db);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            Ok(())
        }
        TimerAction::Run { mute, phases } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_session(mute, phases))
        }
    }
}

fn phase_and_remaining(snapshot: &Event) -> Option<(Phase, u64)> {
    match snapshot {
        Event::StateSnapshot {
            phase,
            remaining_secs,
            ..
        } => Some((*phase, *remaining_secs)),
        _ => None,
    }
}

async fn run_session(mute: bool, phases: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let engine = SessionEngine::new(db);
    let notifier = if mute {
        Notifier::silent()
    } else {
        Notifier::new()
    };
    let (runner, mut events) = SessionRunner::new(engine, notifier);

    let mut completed = 0u32;
    loop {
        if let Some(Event::TimerStarted {
            phase,
            duration_secs,
            ..
        }) = runner.start().await
        {
            println!("{} -- {} min", phase.label(), duration_secs / 60);
        }

        // Render the countdown until this phase completes.
        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(Event::PhaseCompleted { phase, completed_today, .. }) => {
                            println!("\r{} complete -- {} focus today", phase.label(), completed_today);
                            break;
                        }
                        Some(_) => {}
                        None => return Ok(()),
                    }
                }
                _ = tokio::time::sleep(Duration::from_millis(250)) => {
                    if let Some((phase, remaining)) = phase_and_remaining(&runner.snapshot().await) {
                        print!("\r{} {:02}:{:02}  ", phase.label(), remaining / 60, remaining % 60);
                        io::stdout().flush()?;
                    }
                }
            }
        }

        completed += 1;
        if phases.is_some_and(|limit| completed >= limit) {
            return Ok(());
        }

        // The next phase stays paused until the user acknowledges it.
        if let Some((next, remaining)) = phase_and_remaining(&runner.snapshot().await) {
            println!(
                "next: {} ({} min) -- press Enter to start",
                next.label(),
                remaining / 60
            );
        }
        let (read, _line) = tokio::task::spawn_blocking(|| {
            let mut buf = String::new();
            io::stdin().read_line(&mut buf).map(|n| (n, buf))
        })
        .await??;
        if read == 0 {
            // EOF: the session ends, nothing to clean up beyond the runner.
            return Ok(());
        }
    }
}
