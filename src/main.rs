//! Neon Pulse entry point
//!
//! The browser build is driven from JavaScript through `neon_pulse::web`.
//! Natively this runs a headless session: a scripted beat, a synthetic
//! dancer sweeping their hands across the stage and a hand-cranked clock.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::f32::consts::TAU;
    use std::path::PathBuf;
    use std::rc::Rc;

    use anyhow::Result;
    use clap::Parser;

    use neon_pulse::audio::ScriptedFeed;
    use neon_pulse::clock::{Clock, ManualClock};
    use neon_pulse::commentary::{CommentaryTrigger, Dispatch};
    use neon_pulse::pose::{Landmark, LandmarkIndex, Skeleton};
    use neon_pulse::sim::{GameEvent, Surface};
    use neon_pulse::{Engine, QualityPreset, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "neon-pulse", version, about = "Headless Neon Pulse session")]
    struct Args {
        /// RNG seed (a seed in the settings file wins)
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of pose deliveries to simulate
        #[arg(long, default_value_t = 3600)]
        ticks: u64,

        /// Pose delivery rate
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        #[arg(long, default_value_t = 1280.0)]
        width: f32,

        #[arg(long, default_value_t = 720.0)]
        height: f32,

        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Override the quality preset (low, medium, high)
        #[arg(long)]
        quality: Option<QualityPreset>,
    }

    /// Both hands trace a figure eight; the head bobs with the beat
    fn dancer(tick: u64) -> Skeleton {
        let t = tick as f32 / 90.0 * TAU;
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.1); LandmarkIndex::COUNT];
        let mut set = |index: LandmarkIndex, x: f32, y: f32| {
            landmarks[index.index()] = Landmark::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0), 0.95);
        };

        set(LandmarkIndex::Nose, 0.5, 0.25 + 0.02 * (t * 4.0).sin());
        set(LandmarkIndex::LeftShoulder, 0.4, 0.4);
        set(LandmarkIndex::RightShoulder, 0.6, 0.4);
        set(LandmarkIndex::LeftHip, 0.43, 0.7);
        set(LandmarkIndex::RightHip, 0.57, 0.7);

        let (lx, ly) = (0.3 + 0.25 * t.sin(), 0.5 + 0.35 * (2.0 * t).sin());
        let (rx, ry) = (0.7 - 0.25 * t.sin(), 0.5 - 0.35 * (2.0 * t).sin());
        set(LandmarkIndex::LeftElbow, (0.4 + lx) / 2.0, (0.4 + ly) / 2.0);
        set(LandmarkIndex::RightElbow, (0.6 + rx) / 2.0, (0.4 + ry) / 2.0);
        set(LandmarkIndex::LeftWrist, lx, ly);
        set(LandmarkIndex::RightWrist, rx, ry);
        set(LandmarkIndex::LeftIndex, lx + 0.02, ly - 0.02);
        set(LandmarkIndex::RightIndex, rx - 0.02, ry - 0.02);

        Skeleton::new(landmarks)
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let mut settings = args
            .settings
            .as_ref()
            .map(Settings::load_or_default)
            .unwrap_or_default();
        if let Some(quality) = args.quality {
            settings.quality = quality;
        }
        let seed = settings.seed.unwrap_or(args.seed);

        if args.fps.is_nan() || args.fps <= 0.0 {
            anyhow::bail!("fps must be positive, got {}", args.fps);
        }
        let frame_ms = 1000.0 / args.fps;

        let clock = Rc::new(ManualClock::new(0.0));
        let mut engine = Engine::new(
            seed,
            settings,
            Box::new(Rc::clone(&clock)),
            Box::new(ScriptedFeed::beat(30, 4)),
            CommentaryTrigger::preset(seed, Dispatch::Detached),
        );
        let surface = Surface::new(args.width, args.height);

        let mut hits = 0usize;
        let mut lines = 0usize;
        for tick in 0..args.ticks {
            let skeleton = dancer(tick);
            if let Some(frame) = engine.on_pose(Some(&skeleton), surface) {
                hits += frame
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::TargetHit { .. }))
                    .count();
                if let Some(line) = frame.commentary {
                    lines += 1;
                    log::info!("[{:>6.0} ms] {line}", clock.now_ms());
                }
            }
            clock.advance(frame_ms);
        }

        let state = engine.state();
        log::info!(
            "{} ticks: score {}, combo {}, {hits} hits, {} targets live, {} particles",
            state.time_ticks,
            engine.score(),
            engine.combo(),
            state.targets.len(),
            state.particles.len(),
        );
        log::info!("{lines} commentary lines, last: {}", engine.commentary());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Pulse (headless) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is neon_pulse::web::wasm_start
}
