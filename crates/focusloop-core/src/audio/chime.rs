//! Phase-completion chime synthesis.
//!
//! Three ascending sine tones (C5, E5, G5) starting 0.2 s apart, each with
//! a linear attack and an exponential decay tail.

use std::f32::consts::PI;
use std::time::Duration;

use rodio::Source;

const SAMPLE_RATE: u32 = 44_100;

/// (frequency Hz, onset seconds) per tone.
const TONES: [(f32, f32); 3] = [(523.25, 0.0), (659.25, 0.2), (783.99, 0.4)];

/// Linear attack length and peak amplitude per tone.
const ATTACK_SECS: f32 = 0.1;
const PEAK: f32 = 0.3;
/// Each tone decays exponentially to this amplitude at `TONE_SECS`.
const FLOOR: f32 = 0.01;
const TONE_SECS: f32 = 2.0;

/// Three-tone chime as a finite mono sample stream.
pub struct Chime {
    position: usize,
    total_samples: usize,
}

impl Chime {
    pub fn new() -> Self {
        let last_onset = TONES[TONES.len() - 1].1;
        let total_secs = last_onset + TONE_SECS;
        Self {
            position: 0,
            total_samples: (total_secs * SAMPLE_RATE as f32) as usize,
        }
    }

    /// Amplitude envelope of one tone, `t` seconds after its onset.
    fn envelope(t: f32) -> f32 {
        if t < 0.0 || t >= TONE_SECS {
            return 0.0;
        }
        if t < ATTACK_SECS {
            return PEAK * (t / ATTACK_SECS);
        }
        let decay_progress = (t - ATTACK_SECS) / (TONE_SECS - ATTACK_SECS);
        PEAK * (FLOOR / PEAK).powf(decay_progress)
    }
}

impl Default for Chime {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Chime {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.total_samples {
            return None;
        }
        let t = self.position as f32 / SAMPLE_RATE as f32;
        self.position += 1;

        let sample = TONES
            .iter()
            .map(|&(freq, onset)| {
                let local = t - onset;
                Self::envelope(local) * (2.0 * PI * freq * local).sin()
            })
            .sum();
        Some(sample)
    }
}

impl Source for Chime {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples - self.position)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        let last_onset = TONES[TONES.len() - 1].1;
        Some(Duration::from_secs_f32(last_onset + TONE_SECS))
    }
}
