//! Phase-completion notification.
//!
//! Playback is strictly best-effort: a missing or permission-blocked audio
//! device must never interrupt a phase transition, so every failure path
//! here logs and returns. The rodio output objects are not `Send`; they
//! live on a dedicated thread fed through an mpsc channel.

mod chime;

pub use chime::Chime;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use log::warn;
use rodio::{OutputStream, Sink};

enum AudioCommand {
    Chime,
}

/// Fire-and-forget chime trigger.
#[derive(Clone)]
pub struct Notifier {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
    muted: Arc<AtomicBool>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            muted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A notifier that never makes a sound (tests, `--mute`).
    pub fn silent() -> Self {
        let notifier = Self::new();
        notifier.set_muted(true);
        notifier
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    /// Play the completion chime. Muted or device-less environments no-op.
    pub fn chime(&self) {
        if self.is_muted() {
            return;
        }
        match self.ensure_thread() {
            Ok(tx) => {
                if tx.send(AudioCommand::Chime).is_err() {
                    warn!("audio thread gone, chime dropped");
                }
            }
            Err(e) => warn!("audio unavailable, chime dropped: {e}"),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>, String> {
        let mut guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();

        // Dedicated audio thread holding the non-Send output objects.
        thread::Builder::new()
            .name("audio-notifier".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("no audio output stream: {e}"))?;
                        let new_sink =
                            Sink::try_new(&handle).map_err(|e| format!("no audio sink: {e}"))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Chime => {
                            if let Err(e) = ensure_sink(&mut _stream, &mut sink) {
                                warn!("chime skipped: {e}");
                                continue;
                            }
                            if let Some(ref s) = sink {
                                s.append(Chime::new());
                            }
                        }
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *guard = Some(tx);
        Ok(tx_clone)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
