use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

use crate::clock::{
    format, ClockEvent, CountdownClock, ModeKind, PlaybackClock, PlaybackState, RunState,
    TimerState,
};
use crate::state::Config;

const BAR_WIDTH: usize = 20;

#[derive(Serialize)]
struct TimerLine {
    tick: u64,
    run_state: RunState,
    #[serde(flatten)]
    state: TimerState,
    progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<ClockEvent>,
}

#[derive(Serialize)]
struct PlayerLine<'a> {
    tick: u64,
    run_state: RunState,
    title: &'a str,
    artist: &'a str,
    duration_secs: u64,
    #[serde(flatten)]
    state: PlaybackState,
    progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<ClockEvent>,
}

/// Something the headless loop can drive one tick at a time.
trait Headless {
    fn tick(&mut self) -> Option<ClockEvent>;
    fn status_line(&self) -> String;
    fn json_line(&self, tick: u64, event: Option<ClockEvent>) -> Result<String>;
}

impl Headless for CountdownClock {
    fn tick(&mut self) -> Option<ClockEvent> {
        CountdownClock::tick(self)
    }

    fn status_line(&self) -> String {
        let progress = self.progress();
        format!(
            "⏱️  {} {} [{}] {}%",
            format::mm_ss(self.time_left_secs()),
            self.active_kind(),
            format::bar(progress, BAR_WIDTH),
            format::percent(progress)
        )
    }

    fn json_line(&self, tick: u64, event: Option<ClockEvent>) -> Result<String> {
        let line = TimerLine {
            tick,
            run_state: self.run_state(),
            state: self.state(),
            progress: self.progress(),
            event,
        };
        serde_json::to_string(&line).context("Failed to serialize timer status")
    }
}

impl Headless for PlaybackClock {
    fn tick(&mut self) -> Option<ClockEvent> {
        PlaybackClock::tick(self)
    }

    fn status_line(&self) -> String {
        let progress = self.progress();
        format!(
            "▶ {} / {} [{}] {}%",
            format::m_ss(self.current_secs()),
            format::m_ss(self.duration_secs()),
            format::bar(progress, BAR_WIDTH),
            format::percent(progress)
        )
    }

    fn json_line(&self, tick: u64, event: Option<ClockEvent>) -> Result<String> {
        let track = self.track();
        let line = PlayerLine {
            tick,
            run_state: self.run_state(),
            title: &track.title,
            artist: &track.artist,
            duration_secs: track.duration_secs,
            state: self.state(),
            progress: self.progress(),
            event,
        };
        serde_json::to_string(&line).context("Failed to serialize player status")
    }
}

pub async fn timer(dir: &Path, mode: ModeKind, limit: Option<u64>, json: bool) -> Result<()> {
    let config = Config::load_or_default(dir)?;
    let mut clock = config.countdown_clock();
    clock.switch_mode(mode.index());

    if !json {
        println!(
            "🍅 Starting {} ({})",
            mode,
            format::mm_ss(clock.time_left_secs())
        );
    }

    clock.start();
    if let Some(ClockEvent::CycleComplete { finished, next }) =
        drive(&mut clock, &config, limit, json).await?
    {
        if !json {
            println!("🍅 {} complete! Up next: {}", finished, next);
        }
    }
    Ok(())
}

pub async fn player(dir: &Path, from: u64, limit: Option<u64>, json: bool) -> Result<()> {
    let config = Config::load_or_default(dir)?;
    let mut clock = config.playback_clock();
    clock.seek_relative(i64::try_from(from).unwrap_or(i64::MAX));

    if !json {
        let track = clock.track();
        println!("▶ {} - {}", track.title, track.artist);
    }

    clock.play();
    if let Some(ClockEvent::TrackFinished) = drive(&mut clock, &config, limit, json).await? {
        if !json {
            println!("■ Track finished");
        }
    }
    Ok(())
}

/// Ticks `clock` once per configured period until it reports a boundary
/// event, `limit` ticks have elapsed, or Ctrl-C arrives.
async fn drive<C: Headless>(
    clock: &mut C,
    config: &Config,
    limit: Option<u64>,
    json: bool,
) -> Result<Option<ClockEvent>> {
    let period = config.tick_period();
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    let mut stdout = io::stdout();
    if !json {
        print!("\r{}", clock.status_line());
        stdout.flush()?;
    }

    let mut ticks = 0u64;
    let outcome = loop {
        if limit.is_some_and(|limit| ticks >= limit) {
            break None;
        }

        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!(ticks, "interrupted");
                break None;
            }
        }

        ticks += 1;
        let event = clock.tick();
        if json {
            writeln!(stdout, "{}", clock.json_line(ticks, event)?)?;
        } else {
            print!("\r{}", clock.status_line());
        }
        stdout.flush()?;

        if event.is_some() {
            break event;
        }
    };

    if !json {
        println!();
    }
    Ok(outcome)
}
