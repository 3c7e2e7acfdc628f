use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use l2w_core::{
    Canvas, Clock, Engine, EngineParams, InstantClock, ManualClock, Sprite, MELODIC_PROBE_LIMIT,
    TICK_HZ,
};

mod feed;
mod playback;

use playback::{Playback, PlaybackConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "l2w-replay")]
#[command(about = "Replay a recorded edit feed through the listen-to-edits engine", long_about = None)]
struct Args {
    /// Feed file with one JSON message per line (stdin when omitted)
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    width: i32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Seconds between consecutive feed messages
    #[arg(long, value_name = "SECONDS", default_value_t = 0.5)]
    interval: f64,

    /// Seed for the ambient voice choice
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Run against the wall clock, sleeping between frames
    #[arg(long)]
    realtime: bool,

    /// Voices in each melodic bank
    #[arg(long, default_value_t = 27)]
    melodic_voices: usize,

    /// Voices in the ambient bank
    #[arg(long, default_value_t = 3)]
    ambient_voices: usize,

    /// How long a melodic note keeps its voice busy
    #[arg(long, value_name = "SECONDS", default_value_t = 2.5)]
    note_secs: f64,

    /// How long an ambient swell keeps its voice busy
    #[arg(long, value_name = "SECONDS", default_value_t = 6.0)]
    swell_secs: f64,

    /// Neighbouring voices tried before a melodic note retriggers
    #[arg(long, default_value_t = MELODIC_PROBE_LIMIT)]
    probe_limit: usize,
}

enum FrameClock {
    Virtual(ManualClock),
    Wall(InstantClock),
}

impl FrameClock {
    fn now_sec(&self) -> f64 {
        match self {
            FrameClock::Virtual(c) => c.now_sec(),
            FrameClock::Wall(c) => c.now_sec(),
        }
    }

    fn wait(&mut self, frame: Duration) {
        match self {
            FrameClock::Virtual(c) => c.advance(frame),
            FrameClock::Wall(_) => thread::sleep(frame),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let events = match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening feed {}", path.display()))?;
            feed::read_feed(BufReader::new(file))?
        }
        None => feed::read_feed(io::stdin().lock())?,
    };
    log::info!("[replay] loaded {} events", events.len());

    let canvas = Canvas::new(args.width, args.height);
    let params = EngineParams {
        melodic_probe_limit: args.probe_limit,
        ..EngineParams::default()
    };
    let mut engine = Engine::new(params, args.seed);
    let mut playback = Playback::new(&PlaybackConfig {
        ambient_voices: args.ambient_voices,
        melodic_voices: args.melodic_voices,
        note_secs: args.note_secs,
        swell_secs: args.swell_secs,
    });

    let mut clock = if args.realtime {
        FrameClock::Wall(InstantClock::new())
    } else {
        FrameClock::Virtual(ManualClock::default())
    };
    let frame = Duration::from_secs_f64(1.0 / TICK_HZ);
    let mut sprites: Vec<Sprite> = Vec::new();
    let mut pending = events.into_iter().enumerate().peekable();
    let mut frames = 0u64;
    let mut peak_sprites = 0usize;

    loop {
        let now = clock.now_sec();
        playback.refresh(now);

        while let Some((i, _)) = pending.peek() {
            if (*i as f64) * args.interval > now {
                break;
            }
            let Some((_, event)) = pending.next() else {
                break;
            };
            let response = engine
                .handle(&event, canvas, now, &playback.banks)
                .with_context(|| format!("handling {:?}", event.key))?;
            if let Some(cue) = &response.sound {
                playback.play(cue, now);
            }
            match (&response.element, &response.sound) {
                (Some(e), Some(s)) => log::info!(
                    "[event] {:?} {:?} at ({},{}) r={:.1} -> {:?}[{}]{}",
                    event.key,
                    event.category,
                    e.position().x,
                    e.position().y,
                    e.radius(),
                    s.instrument,
                    s.voice_index,
                    if s.retrigger { " retrigger" } else { "" }
                ),
                (Some(e), None) => log::info!(
                    "[event] {:?} {:?} at ({},{}) r={:.1} (silent)",
                    event.key,
                    event.category,
                    e.position().x,
                    e.position().y,
                    e.radius()
                ),
                (None, Some(s)) => log::info!(
                    "[event] {:?} {:?} -> {:?}[{}]{}",
                    event.key,
                    event.category,
                    s.instrument,
                    s.voice_index,
                    if s.retrigger { " retrigger" } else { "" }
                ),
                (None, None) => {}
            }
        }

        sprites.clear();
        engine.tick(now, &mut sprites);
        peak_sprites = peak_sprites.max(sprites.len());
        if frames % (TICK_HZ as u64) == 0 {
            log::debug!(
                "[frame {frames}] t={now:.2}s sprites={} busy_voices={}",
                sprites.len(),
                playback.busy_voices()
            );
        }
        frames += 1;

        if pending.peek().is_none() && engine.registry().is_empty() {
            break;
        }
        clock.wait(frame);
    }

    log::info!(
        "[replay] done after {frames} frames ({:.1}s): peak sprites={peak_sprites} started={} retriggered={}",
        clock.now_sec(),
        playback.stats.started,
        playback.stats.retriggered
    );
    let recent: Vec<&str> = engine.recent_keys().collect();
    log::info!("[replay] last keys: {}", recent.join(" | "));
    Ok(())
}
