//! Band-energy input from the music analyser
//!
//! The analyser itself lives outside the engine. The engine polls an
//! `AudioFeed` once per tick and only ever sees three scalars.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::STRONG_BEAT_THRESHOLD;

/// Spectrum bins averaged into each band
const BASS_BINS: std::ops::Range<usize> = 0..10;
const MID_BINS: std::ops::Range<usize> = 10..50;
const TREBLE_BINS: std::ops::Range<usize> = 50..100;

/// Per-tick snapshot, each band in [0,1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioVisuals {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

fn unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

impl AudioVisuals {
    /// Out-of-range and NaN inputs are clamped into [0,1]
    pub fn new(bass: f32, mid: f32, treble: f32) -> Self {
        Self {
            bass: unit(bass),
            mid: unit(mid),
            treble: unit(treble),
        }
    }

    /// Reduce a byte-scaled frequency spectrum (0-255 per bin) to bands.
    ///
    /// Bins the spectrum doesn't have count as silence, so an empty slice
    /// (analyser not ready) gives all zeros.
    pub fn from_spectrum(bins: &[u8]) -> Self {
        let band = |range: std::ops::Range<usize>| {
            let width = range.len() as f32;
            let sum: u32 = bins
                .get(range.start..range.end.min(bins.len()))
                .unwrap_or(&[])
                .iter()
                .map(|&b| u32::from(b))
                .sum();
            sum as f32 / width / 255.0
        };
        Self::new(band(BASS_BINS), band(MID_BINS), band(TREBLE_BINS))
    }

    /// Strong bass hit: raises spawn rate and spawns high-energy targets
    pub fn is_strong_beat(&self) -> bool {
        self.bass > STRONG_BEAT_THRESHOLD
    }
}

/// Source of audio snapshots, polled once per tick
pub trait AudioFeed {
    fn sample(&mut self) -> AudioVisuals;
}

/// No music loaded
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentFeed;

impl AudioFeed for SilentFeed {
    fn sample(&mut self) -> AudioVisuals {
        AudioVisuals::default()
    }
}

/// Latest analysis written by the host between ticks
#[derive(Debug, Clone, Default)]
pub struct SharedFeed {
    latest: Rc<Cell<AudioVisuals>>,
}

impl SharedFeed {
    pub fn new(latest: Rc<Cell<AudioVisuals>>) -> Self {
        Self { latest }
    }

    /// Handle the host keeps to publish new analysis
    pub fn handle(&self) -> Rc<Cell<AudioVisuals>> {
        Rc::clone(&self.latest)
    }
}

impl AudioFeed for SharedFeed {
    fn sample(&mut self) -> AudioVisuals {
        self.latest.get()
    }
}

/// Replays a fixed pattern, one snapshot per tick, looping
#[derive(Debug, Clone, Default)]
pub struct ScriptedFeed {
    frames: Vec<AudioVisuals>,
    cursor: usize,
}

impl ScriptedFeed {
    pub fn new(frames: Vec<AudioVisuals>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// `period` ticks per bar, the first `hit_ticks` of each with a strong bass hit
    pub fn beat(period: usize, hit_ticks: usize) -> Self {
        let frames = (0..period.max(1))
            .map(|i| {
                if i < hit_ticks {
                    AudioVisuals::new(0.9, 0.6, 0.4)
                } else {
                    AudioVisuals::new(0.3, 0.2, 0.1)
                }
            })
            .collect();
        Self::new(frames)
    }
}

impl AudioFeed for ScriptedFeed {
    fn sample(&mut self) -> AudioVisuals {
        if self.frames.is_empty() {
            return AudioVisuals::default();
        }
        let frame = self.frames[self.cursor % self.frames.len()];
        self.cursor = self.cursor.wrapping_add(1);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_banding() {
        let mut bins = [0u8; 128];
        bins[..10].fill(255);
        bins[10..50].fill(51);
        let visuals = AudioVisuals::from_spectrum(&bins);
        assert!((visuals.bass - 1.0).abs() < 1e-6);
        assert!((visuals.mid - 0.2).abs() < 1e-6);
        assert_eq!(visuals.treble, 0.0);
        assert!(visuals.is_strong_beat());
    }

    #[test]
    fn test_short_or_empty_spectrum_is_quiet() {
        assert_eq!(AudioVisuals::from_spectrum(&[]), AudioVisuals::default());
        let short = AudioVisuals::from_spectrum(&[255; 5]);
        assert!((short.bass - 0.5).abs() < 1e-6);
        assert_eq!(short.mid, 0.0);
    }

    #[test]
    fn test_new_clamps() {
        let v = AudioVisuals::new(1.5, -0.2, f32::NAN);
        assert_eq!(v, AudioVisuals::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_strong_beat_threshold_is_exclusive() {
        assert!(!AudioVisuals::new(0.7, 0.0, 0.0).is_strong_beat());
        assert!(AudioVisuals::new(0.71, 0.0, 0.0).is_strong_beat());
    }

    #[test]
    fn test_shared_feed_reads_latest() {
        let mut feed = SharedFeed::default();
        let handle = feed.handle();
        handle.set(AudioVisuals::new(0.8, 0.1, 0.1));
        assert!(feed.sample().is_strong_beat());
    }

    #[test]
    fn test_scripted_feed_loops() {
        let mut feed = ScriptedFeed::beat(4, 1);
        let beats: Vec<bool> = (0..8).map(|_| feed.sample().is_strong_beat()).collect();
        assert_eq!(beats, vec![true, false, false, false, true, false, false, false]);
        assert_eq!(ScriptedFeed::default().sample(), AudioVisuals::default());
    }
}
