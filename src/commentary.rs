//! Hype commentary on score milestones
//!
//! Requests are fire-and-forget: the producer runs off the tick (on one
//! long-lived worker thread natively) and posts its text into a mailbox. The engine drains the
//! mailbox once per tick and keeps only the newest line, so whichever
//! request resolves last wins. `cancel_pending` bumps a generation counter
//! so replies to requests made before the cancel are thrown away.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender, unbounded};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{Error, Result};

/// Shown before the first milestone
pub const INITIAL_COMMENTARY: &str = "Ready to dance? 💃";
/// Shown when the producer fails
pub const FALLBACK_COMMENTARY: &str = "Keep the rhythm going! 🎶";

const PRESET_LINES: [&str; 16] = [
    "Laser sharp moves! ⚡️",
    "Neon legend rising! 🎸",
    "System overload! Amazing! 🔥",
    "Unstoppable! 🚀",
    "Perfect sync! ✨",
    "Cyberpunk god! 💎",
    "Maximum energy! 🔋",
    "Rhythm master! 🎵",
    "In the zone! 👁️",
    "Electric feel! 🎹",
    "Pure adrenaline! 💉",
    "Glitch perfect! 👾",
    "Sonic boom! 💥",
    "Lightning fast! 🌩️",
    "Bass drop detected! 🎧",
    "Pixel perfect! 🕹️",
];

/// External text generator
pub trait CommentaryProducer: Send + Sync {
    /// Short line (a handful of words) for the current score state
    fn generate(&self, score: u64, combo: u32) -> Result<String>;
}

/// Picks one of a fixed set of neon hype lines
#[derive(Debug)]
pub struct PresetCommentary {
    rng: Mutex<Pcg32>,
}

impl PresetCommentary {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(Pcg32::seed_from_u64(seed)),
        }
    }
}

impl CommentaryProducer for PresetCommentary {
    fn generate(&self, _score: u64, _combo: u32) -> Result<String> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::Commentary("preset picker poisoned".into()))?;
        let line = PRESET_LINES[rng.random_range(0..PRESET_LINES.len())];
        Ok(line.to_string())
    }
}

/// Where producer calls run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// On a background worker thread (runs inline on wasm32, which has none)
    Detached,
    /// Synchronously inside `fire`; the reply still goes through the mailbox
    Inline,
}

/// `(generation, text)`
type Reply = (u64, String);

/// `(generation, score, combo)`
type Request = (u64, u64, u32);

pub struct CommentaryTrigger {
    producer: Arc<dyn CommentaryProducer>,
    generation: Arc<AtomicU64>,
    /// Worker inbox; `None` resolves inline
    requests: Option<Sender<Request>>,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl CommentaryTrigger {
    pub fn new(producer: Arc<dyn CommentaryProducer>, dispatch: Dispatch) -> Self {
        let (tx, rx) = unbounded();
        let generation = Arc::new(AtomicU64::new(0));
        let requests = match dispatch {
            Dispatch::Inline => None,
            Dispatch::Detached => {
                spawn_worker(Arc::clone(&producer), Arc::clone(&generation), tx.clone())
            }
        };
        Self {
            producer,
            generation,
            requests,
            tx,
            rx,
        }
    }

    /// Preset lines, seeded for reproducible sessions
    pub fn preset(seed: u64, dispatch: Dispatch) -> Self {
        Self::new(Arc::new(PresetCommentary::new(seed)), dispatch)
    }

    /// Request a line for (score, combo) without waiting for it
    pub fn fire(&self, score: u64, combo: u32) {
        let generation = self.generation.load(Ordering::Acquire);
        if let Some(requests) = &self.requests {
            if requests.send((generation, score, combo)).is_ok() {
                return;
            }
            log::warn!("commentary worker gone, resolving inline");
        }
        let text = resolve(self.producer.as_ref(), score, combo);
        // The receiver lives in `self`, so this can't fail
        let _ = self.tx.send((generation, text));
    }

    /// Newest reply since the last poll, if any
    pub fn poll(&self) -> Option<String> {
        let current = self.generation.load(Ordering::Acquire);
        self.rx
            .try_iter()
            .filter(|(generation, _)| *generation == current)
            .map(|(_, text)| text)
            .last()
    }

    /// Drop every request still queued or in flight
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.rx.try_iter().for_each(drop);
    }
}

fn resolve(producer: &dyn CommentaryProducer, score: u64, combo: u32) -> String {
    match producer.generate(score, combo) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("commentary failed at score {score}: {e}");
            FALLBACK_COMMENTARY.to_string()
        }
    }
}

/// Worker loop: only the newest queued request is worth answering, and
/// requests from before a cancel are skipped without calling the producer.
/// Exits when the trigger (the last request sender) is dropped.
#[cfg(not(target_arch = "wasm32"))]
fn run_worker(
    producer: Arc<dyn CommentaryProducer>,
    generation: Arc<AtomicU64>,
    request_rx: Receiver<Request>,
    reply_tx: Sender<Reply>,
) {
    while let Ok(mut request) = request_rx.recv() {
        if let Some(latest) = request_rx.try_iter().last() {
            request = latest;
        }

        let (request_generation, score, combo) = request;
        if request_generation != generation.load(Ordering::Acquire) {
            continue;
        }

        let text = resolve(producer.as_ref(), score, combo);
        if reply_tx.send((request_generation, text)).is_err() {
            break;
        }
    }
    log::debug!("commentary worker stopped");
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_worker(
    producer: Arc<dyn CommentaryProducer>,
    generation: Arc<AtomicU64>,
    reply_tx: Sender<Reply>,
) -> Option<Sender<Request>> {
    let (request_tx, request_rx) = unbounded();
    let spawned = std::thread::Builder::new()
        .name("commentary".into())
        .spawn(move || run_worker(producer, generation, request_rx, reply_tx));

    match spawned {
        Ok(_) => Some(request_tx),
        Err(e) => {
            log::warn!("commentary worker unavailable ({e}), resolving inline");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn_worker(
    _producer: Arc<dyn CommentaryProducer>,
    _generation: Arc<AtomicU64>,
    _reply_tx: Sender<Reply>,
) -> Option<Sender<Request>> {
    None
}
