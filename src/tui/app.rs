use std::time::{Duration, Instant};

use crate::clock::{format, ClockEvent, CountdownClock, PlaybackClock, Ticker};
use crate::state::Config;

use super::input::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WidgetSet {
    #[default]
    Both,
    Player,
    Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Player,
    Timer,
}

pub const VOLUME_STEP: f64 = 0.05;

pub struct App {
    pub player: PlaybackClock,
    pub timer: CountdownClock,
    player_ticker: Ticker,
    timer_ticker: Ticker,
    pub widgets: WidgetSet,
    pub focus: Focus,
    pub message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, widgets: WidgetSet) -> Self {
        let period = config.tick_period();
        let focus = match widgets {
            WidgetSet::Timer => Focus::Timer,
            WidgetSet::Both | WidgetSet::Player => Focus::Player,
        };
        Self {
            player: config.playback_clock(),
            timer: config.countdown_clock(),
            player_ticker: Ticker::new(period),
            timer_ticker: Ticker::new(period),
            widgets,
            focus,
            message: None,
            should_quit: false,
        }
    }

    pub fn shows_player(&self) -> bool {
        self.widgets != WidgetSet::Timer
    }

    pub fn shows_timer(&self) -> bool {
        self.widgets != WidgetSet::Player
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleFocused => match self.focus {
                Focus::Player => self.player.toggle_play_pause(),
                Focus::Timer => self.timer.toggle_running(),
            },
            Action::SwitchFocus => {
                if self.widgets == WidgetSet::Both {
                    self.focus = match self.focus {
                        Focus::Player => Focus::Timer,
                        Focus::Timer => Focus::Player,
                    };
                }
            }
            Action::SkipBack => self.player.skip_back(),
            Action::SkipForward => self.player.skip_forward(),
            Action::VolumeUp => self.player.adjust_volume(VOLUME_STEP),
            Action::VolumeDown => self.player.adjust_volume(-VOLUME_STEP),
            Action::SeekFraction(fraction) => self.player.seek_to_fraction(fraction),
            Action::Reset => self.timer.reset(),
            Action::SelectMode(index) => self.timer.switch_mode(index),
            Action::CycleMode => self.timer.cycle_mode(),
        }
    }

    /// Keeps each ticker armed only while its clock runs, then delivers the
    /// ticks that came due.
    pub fn on_time(&mut self, now: Instant) {
        self.player_ticker.follow(self.player.is_playing(), now);
        for _ in 0..self.player_ticker.due(now) {
            if let Some(event) = self.player.tick() {
                self.notify(event);
            }
        }
        self.player_ticker.follow(self.player.is_playing(), now);

        self.timer_ticker.follow(self.timer.is_running(), now);
        for _ in 0..self.timer_ticker.due(now) {
            if let Some(event) = self.timer.tick() {
                self.notify(event);
            }
        }
        self.timer_ticker.follow(self.timer.is_running(), now);
    }

    /// How long the event loop may block before the next tick is due.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        [
            self.player_ticker.until_next(now),
            self.timer_ticker.until_next(now),
        ]
        .into_iter()
        .flatten()
        .fold(idle, Duration::min)
    }

    fn notify(&mut self, event: ClockEvent) {
        let text = match event {
            ClockEvent::TrackFinished => format!("Finished: {}", self.player.track().title),
            ClockEvent::CycleComplete { finished, next } => {
                format!("{} complete, up next: {}", finished, next)
            }
        };
        self.message = Some(text);
    }

    pub fn player_elapsed(&self) -> String {
        format::m_ss(self.player.current_secs())
    }

    pub fn player_total(&self) -> String {
        format::m_ss(self.player.duration_secs())
    }

    pub fn timer_display(&self) -> String {
        format::mm_ss(self.timer.time_left_secs())
    }

    pub fn timer_status(&self) -> &'static str {
        if self.timer.is_running() {
            "Focus time!"
        } else {
            "Ready to focus?"
        }
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
