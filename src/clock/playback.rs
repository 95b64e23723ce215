use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::events::{ClockEvent, RunState};

pub const SKIP_SECS: i64 = 10;
pub const DEFAULT_VOLUME: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub duration_secs: u64,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            title: "Cosmic Vibes".to_string(),
            artist: "Electronic Dreams".to_string(),
            duration_secs: 240,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackState {
    pub current_secs: u64,
    pub is_playing: bool,
    pub volume: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_secs: 0,
            is_playing: false,
            volume: DEFAULT_VOLUME,
        }
    }
}

/// Simulated playback position over a single fixed-length track.
///
/// `current_secs` always stays within `0..=duration_secs`. Reaching the end
/// of the track stops playback and rewinds to the start.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    track: Track,
    state: PlaybackState,
}

impl PlaybackClock {
    pub fn new(track: Track, volume: f64) -> Self {
        let mut clock = Self {
            track,
            state: PlaybackState::default(),
        };
        clock.set_volume(volume);
        clock
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn run_state(&self) -> RunState {
        RunState::from_flag(self.state.is_playing)
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn current_secs(&self) -> u64 {
        self.state.current_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.track.duration_secs
    }

    pub fn toggle_play_pause(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        debug!(playing = self.state.is_playing, "playback toggled");
    }

    pub fn play(&mut self) {
        self.state.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    pub fn seek_relative(&mut self, delta_secs: i64) {
        let duration = self.track.duration_secs as i64;
        let target = (self.state.current_secs as i64)
            .saturating_add(delta_secs)
            .clamp(0, duration);
        self.state.current_secs = target as u64;
    }

    pub fn skip_back(&mut self) {
        self.seek_relative(-SKIP_SECS);
    }

    pub fn skip_forward(&mut self) {
        self.seek_relative(SKIP_SECS);
    }

    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = (fraction * self.track.duration_secs as f64).floor() as u64;
        self.state.current_secs = target.min(self.track.duration_secs);
        debug!(position = self.state.current_secs, "seeked");
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.state.volume = if volume.is_nan() {
            DEFAULT_VOLUME
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    pub fn adjust_volume(&mut self, delta: f64) {
        self.set_volume(self.state.volume + delta);
    }

    pub fn progress(&self) -> f64 {
        if self.track.duration_secs == 0 {
            return 0.0;
        }
        (self.state.current_secs as f64 / self.track.duration_secs as f64).min(1.0)
    }

    /// Advances one second of playback. Does nothing while paused.
    pub fn tick(&mut self) -> Option<ClockEvent> {
        if !self.state.is_playing {
            return None;
        }

        let next = self.state.current_secs + 1;
        if next >= self.track.duration_secs {
            self.state.is_playing = false;
            self.state.current_secs = 0;
            info!(title = %self.track.title, "track finished");
            return Some(ClockEvent::TrackFinished);
        }

        self.state.current_secs = next;
        None
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(Track::default(), DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(current_secs: u64, is_playing: bool) -> PlaybackClock {
        let mut clock = PlaybackClock::default();
        clock.state.current_secs = current_secs;
        clock.state.is_playing = is_playing;
        clock
    }

    #[test]
    fn tick_advances_while_playing() {
        let mut clock = clock_at(10, true);
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.current_secs(), 11);
        assert!(clock.is_playing());
    }

    #[test]
    fn tick_is_ignored_while_paused() {
        let mut clock = clock_at(10, false);
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.current_secs(), 10);
    }

    #[test]
    fn last_second_stops_and_rewinds() {
        let mut clock = clock_at(239, true);
        assert_eq!(clock.tick(), Some(ClockEvent::TrackFinished));
        assert!(!clock.is_playing());
        assert_eq!(clock.current_secs(), 0);
    }

    #[test]
    fn tick_at_end_of_track_rewinds() {
        let mut clock = clock_at(240, true);
        assert_eq!(clock.tick(), Some(ClockEvent::TrackFinished));
        assert_eq!(clock.current_secs(), 0);
    }

    #[test]
    fn seek_relative_stays_in_bounds() {
        for start in [0u64, 1, 5, 120, 235, 239, 240] {
            for delta in [-1000i64, -241, -10, -1, 0, 1, 10, 241, 1000, i64::MAX, i64::MIN] {
                let mut clock = clock_at(start, false);
                clock.seek_relative(delta);
                assert!(clock.current_secs() <= 240, "start={start} delta={delta}");
            }
        }
    }

    #[test]
    fn skip_buttons_move_ten_seconds_and_clamp() {
        let mut clock = clock_at(5, false);
        clock.skip_back();
        assert_eq!(clock.current_secs(), 0);
        clock.skip_forward();
        assert_eq!(clock.current_secs(), 10);

        let mut clock = clock_at(235, false);
        clock.skip_forward();
        assert_eq!(clock.current_secs(), 240);
    }

    #[test]
    fn seek_to_fraction_floors() {
        let mut clock = PlaybackClock::default();
        clock.seek_to_fraction(0.5);
        assert_eq!(clock.current_secs(), 120);

        clock.seek_to_fraction(0.999);
        assert_eq!(clock.current_secs(), 239);
    }

    #[test]
    fn seek_to_fraction_clamps_bad_input() {
        let mut clock = PlaybackClock::default();
        clock.seek_to_fraction(1.7);
        assert_eq!(clock.current_secs(), 240);
        clock.seek_to_fraction(-0.3);
        assert_eq!(clock.current_secs(), 0);
        clock.seek_to_fraction(f64::NAN);
        assert_eq!(clock.current_secs(), 0);
    }

    #[test]
    fn volume_is_clamped() {
        let mut clock = PlaybackClock::new(Track::default(), 3.0);
        assert_eq!(clock.state().volume, 1.0);
        clock.adjust_volume(-0.25);
        assert_eq!(clock.state().volume, 0.75);
        clock.adjust_volume(-5.0);
        assert_eq!(clock.state().volume, 0.0);
    }

    #[test]
    fn toggle_flips_run_state() {
        let mut clock = PlaybackClock::default();
        assert_eq!(clock.run_state(), RunState::Stopped);
        clock.toggle_play_pause();
        assert_eq!(clock.run_state(), RunState::Running);
        clock.toggle_play_pause();
        assert_eq!(clock.run_state(), RunState::Stopped);
    }

    #[test]
    fn play_and_pause_are_idempotent() {
        let mut clock = PlaybackClock::default();
        clock.play();
        clock.play();
        assert!(clock.is_playing());
        clock.pause();
        clock.pause();
        assert!(!clock.is_playing());
    }

    #[test]
    fn progress_tracks_position() {
        let clock = clock_at(60, false);
        assert!((clock.progress() - 0.25).abs() < f64::EPSILON);
    }
}
