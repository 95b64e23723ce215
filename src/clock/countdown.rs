use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::events::{ClockEvent, RunState};

pub const MODE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl ModeKind {
    pub const ALL: [ModeKind; MODE_COUNT] =
        [ModeKind::Focus, ModeKind::ShortBreak, ModeKind::LongBreak];

    pub fn index(self) -> usize {
        match self {
            ModeKind::Focus => 0,
            ModeKind::ShortBreak => 1,
            ModeKind::LongBreak => 2,
        }
    }

    /// Mode selected automatically once this one runs out.
    /// Every break, long or short, returns to focus.
    pub fn successor(self) -> ModeKind {
        match self {
            ModeKind::Focus => ModeKind::ShortBreak,
            ModeKind::ShortBreak | ModeKind::LongBreak => ModeKind::Focus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModeKind::Focus => "Focus",
            ModeKind::ShortBreak => "Short Break",
            ModeKind::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub duration_secs: u64,
    pub color: String,
}

impl Mode {
    pub fn default_for(kind: ModeKind) -> Self {
        let (duration_secs, color) = match kind {
            ModeKind::Focus => (1500, "#FF6B35"),
            ModeKind::ShortBreak => (300, "#4ECDC4"),
            ModeKind::LongBreak => (900, "#45B7D1"),
        };
        Self {
            duration_secs,
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub active_mode: ModeKind,
    pub time_left_secs: u64,
    pub is_running: bool,
}

/// Pomodoro countdown over a fixed rotation of three modes.
#[derive(Debug, Clone)]
pub struct CountdownClock {
    modes: [Mode; MODE_COUNT],
    active: usize,
    time_left_secs: u64,
    is_running: bool,
    completed_focus: u32,
}

impl CountdownClock {
    pub fn new(modes: [Mode; MODE_COUNT]) -> Self {
        let time_left_secs = modes[0].duration_secs;
        Self {
            modes,
            active: 0,
            time_left_secs,
            is_running: false,
            completed_focus: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            active_mode: self.active_kind(),
            time_left_secs: self.time_left_secs,
            is_running: self.is_running,
        }
    }

    pub fn run_state(&self) -> RunState {
        RunState::from_flag(self.is_running)
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_kind(&self) -> ModeKind {
        ModeKind::ALL[self.active]
    }

    pub fn active_mode(&self) -> &Mode {
        &self.modes[self.active]
    }

    pub fn modes(&self) -> impl Iterator<Item = (ModeKind, &Mode)> {
        ModeKind::ALL.into_iter().zip(self.modes.iter())
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus
    }

    pub fn toggle_running(&mut self) {
        self.is_running = !self.is_running;
        debug!(running = self.is_running, mode = %self.active_kind(), "timer toggled");
    }

    pub fn start(&mut self) {
        self.is_running = true;
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    pub fn reset(&mut self) {
        self.is_running = false;
        self.time_left_secs = self.active_mode().duration_secs;
    }

    /// Selects the mode at `index` and stops the timer.
    /// Indices outside the mode set are ignored.
    pub fn switch_mode(&mut self, index: usize) {
        if index >= MODE_COUNT {
            return;
        }
        self.is_running = false;
        self.active = index;
        self.time_left_secs = self.modes[index].duration_secs;
        debug!(mode = %self.active_kind(), "mode switched");
    }

    pub fn cycle_mode(&mut self) {
        self.switch_mode((self.active + 1) % MODE_COUNT);
    }

    pub fn progress(&self) -> f64 {
        let total = self.active_mode().duration_secs;
        if total == 0 {
            return 1.0;
        }
        (total.saturating_sub(self.time_left_secs) as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Counts one second down. Does nothing while stopped.
    pub fn tick(&mut self) -> Option<ClockEvent> {
        if !self.is_running {
            return None;
        }

        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs > 0 {
            return None;
        }

        let finished = self.active_kind();
        let next = finished.successor();
        if finished == ModeKind::Focus {
            self.completed_focus += 1;
        }

        self.is_running = false;
        self.active = next.index();
        self.time_left_secs = self.modes[self.active].duration_secs;
        info!(%finished, %next, "cycle complete");

        Some(ClockEvent::CycleComplete { finished, next })
    }
}

impl Default for CountdownClock {
    fn default() -> Self {
        Self::new(ModeKind::ALL.map(Mode::default_for))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_with(left: u64) -> CountdownClock {
        let mut clock = CountdownClock::default();
        clock.time_left_secs = left;
        clock.is_running = true;
        clock
    }

    #[test]
    fn starts_in_focus_with_full_duration() {
        let clock = CountdownClock::default();
        assert_eq!(clock.active_kind(), ModeKind::Focus);
        assert_eq!(clock.time_left_secs(), 1500);
        assert!(!clock.is_running());
    }

    #[test]
    fn tick_counts_down_while_running() {
        let mut clock = running_with(10);
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.time_left_secs(), 9);
    }

    #[test]
    fn tick_is_ignored_while_stopped() {
        let mut clock = CountdownClock::default();
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.time_left_secs(), 1500);
    }

    #[test]
    fn focus_expiry_moves_to_short_break() {
        let mut clock = running_with(1);
        let event = clock.tick();
        assert_eq!(
            event,
            Some(ClockEvent::CycleComplete {
                finished: ModeKind::Focus,
                next: ModeKind::ShortBreak,
            })
        );
        assert!(!clock.is_running());
        assert_eq!(clock.active_index(), 1);
        assert_eq!(clock.time_left_secs(), 300);
        assert_eq!(clock.completed_focus_sessions(), 1);
    }

    #[test]
    fn breaks_return_to_focus() {
        for index in [1, 2] {
            let mut clock = CountdownClock::default();
            clock.switch_mode(index);
            clock.time_left_secs = 1;
            clock.start();
            clock.tick();
            assert_eq!(clock.active_kind(), ModeKind::Focus);
            assert_eq!(clock.time_left_secs(), 1500);
            assert_eq!(clock.completed_focus_sessions(), 0);
        }
    }

    #[test]
    fn out_of_range_switch_is_ignored() {
        let mut clock = running_with(42);
        let before = clock.state();
        clock.switch_mode(99);
        assert_eq!(clock.state(), before);
    }

    #[test]
    fn switch_mode_stops_and_loads_duration() {
        let mut clock = running_with(42);
        clock.switch_mode(2);
        assert!(!clock.is_running());
        assert_eq!(clock.active_kind(), ModeKind::LongBreak);
        assert_eq!(clock.time_left_secs(), 900);
    }

    #[test]
    fn reset_restores_full_duration() {
        let mut clock = CountdownClock::default();
        clock.switch_mode(1);
        clock.start();
        for _ in 0..37 {
            clock.tick();
        }
        assert_eq!(clock.time_left_secs(), 263);

        clock.reset();
        assert!(!clock.is_running());
        assert_eq!(clock.time_left_secs(), 300);
    }

    #[test]
    fn pause_keeps_remaining_time() {
        let mut clock = running_with(100);
        clock.tick();
        clock.pause();
        clock.tick();
        assert_eq!(clock.time_left_secs(), 99);
        assert_eq!(clock.run_state(), RunState::Stopped);
    }

    #[test]
    fn cycle_mode_wraps() {
        let mut clock = CountdownClock::default();
        clock.cycle_mode();
        clock.cycle_mode();
        assert_eq!(clock.active_kind(), ModeKind::LongBreak);
        clock.cycle_mode();
        assert_eq!(clock.active_kind(), ModeKind::Focus);
    }

    #[test]
    fn progress_grows_as_time_runs_out() {
        let clock = running_with(750);
        assert!((clock.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn full_cycle_runs_to_completion() {
        let mut clock = CountdownClock::new([
            Mode { duration_secs: 3, color: "#FF0000".into() },
            Mode { duration_secs: 2, color: "#00FF00".into() },
            Mode { duration_secs: 4, color: "#0000FF".into() },
        ]);
        clock.start();
        let events: Vec<_> = (0..3).filter_map(|_| clock.tick()).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(clock.active_kind(), ModeKind::ShortBreak);
        assert_eq!(clock.time_left_secs(), 2);
    }
}
