//! Replay driver: sign-to-voice.
//!
//! # Usage
//!
//! ```text
//! sign-to-voice <recording.jsonl> [--realtime]
//! ```
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Load the landmark recording.
//! 4. Create the [`tokio`] runtime.
//! 5. Spawn the session runner and feed it every recorded frame, sleeping
//!    between frames with `--realtime`.
//! 6. Wait for speech to finish and print the session summary.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use tokio::sync::mpsc;

use sign_to_voice::{
    config::{AppConfig, AppPaths},
    hand::{PoseProvider, Recording, ReplayProvider},
    pipeline::{new_shared_state, Frame, SessionEvent, SessionRunner},
    speech::SpeechDispatcher,
};

const USAGE: &str = "usage: sign-to-voice <recording.jsonl> [--realtime]";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

struct Args {
    recording: String,
    realtime: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut recording = None;
    let mut realtime = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => realtime = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown option `{flag}`\n{USAGE}"),
            path if recording.is_none() => recording = Some(path.to_string()),
            extra => bail!("unexpected argument `{extra}`\n{USAGE}"),
        }
    }

    let recording = recording.context(USAGE)?;
    Ok(Args {
        recording,
        realtime,
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e:#}); using defaults");
        AppConfig::default()
    });

    // 3. Recording
    let path = AppPaths::new().resolve_recording(&args.recording);
    let recording = Recording::load(&path)
        .with_context(|| format!("failed to load recording {}", path.display()))?;
    log::info!(
        "loaded {} frames ({:.1} s) from {}",
        recording.len(),
        recording.duration().as_secs_f32(),
        path.display()
    );

    // 4. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(replay(config, recording, args.realtime))
}

async fn replay(config: AppConfig, recording: Recording, realtime: bool) -> anyhow::Result<()> {
    let state = new_shared_state();
    let speech = Arc::new(SpeechDispatcher::from_config(&config.speech));
    let runner = SessionRunner::from_config(Arc::clone(&state), &config, Arc::clone(&speech));

    // 5. Feed frames
    let (tx, rx) = mpsc::channel::<SessionEvent>(64);
    let task = tokio::spawn(runner.run(rx));

    let mut provider = ReplayProvider::new();
    let base = Instant::now();
    for frame in recording.frames() {
        let Some(at) = base.checked_add(frame.offset) else {
            bail!("frame offset {:?} is out of range", frame.offset);
        };
        if realtime {
            tokio::time::sleep_until(at.into()).await;
        }
        let hands = provider.detect(frame);
        if tx.send(SessionEvent::Frame(Frame { hands, at })).await.is_err() {
            bail!("session runner stopped unexpectedly");
        }
    }
    drop(tx);
    task.await.context("session runner task failed")?;

    // 6. Summary
    speech.wait_idle().await;

    let st = state
        .lock()
        .map_err(|e| anyhow::anyhow!("session state poisoned: {e}"))?;
    println!("frames:          {}", st.stats.frames);
    println!(
        "hand frames:     {} ({:.1}%)",
        st.stats.hand_frames,
        st.stats.detection_rate()
    );
    println!("actions:         {}", st.stats.actions);
    println!("utterances:      {}", st.stats.utterances);
    if let Some(spoken) = &st.last_spoken {
        println!("last spoken:     {spoken:?}");
    }
    println!("final text:      {:?}", st.text);
    log::debug!(
        "replay provider saw {} frames, {} with hands",
        provider.frames_seen(),
        provider.hands_seen()
    );

    Ok(())
}
