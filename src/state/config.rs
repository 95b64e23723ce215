use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::clock::{playback::DEFAULT_VOLUME, CountdownClock, Mode, ModeKind, PlaybackClock, Track};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modes {
    pub focus: Mode,
    pub short_break: Mode,
    pub long_break: Mode,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            focus: Mode::default_for(ModeKind::Focus),
            short_break: Mode::default_for(ModeKind::ShortBreak),
            long_break: Mode::default_for(ModeKind::LongBreak),
        }
    }
}

impl Modes {
    pub fn get(&self, kind: ModeKind) -> &Mode {
        match kind {
            ModeKind::Focus => &self.focus,
            ModeKind::ShortBreak => &self.short_break,
            ModeKind::LongBreak => &self.long_break,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_millis: u64,
    pub volume: f64,
    pub track: Track,
    pub modes: Modes,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_millis: 1000,
            volume: DEFAULT_VOLUME,
            track: Track::default(),
            modes: Modes::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML from {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Loads `<dir>/config.toml`, falling back to defaults when it is absent.
    pub fn load_or_default(dir: &Path) -> anyhow::Result<Self> {
        let path = Self::config_path(dir);
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content =
            toml::to_string_pretty(&self).with_context(|| "Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tick_millis == 0 {
            bail!("tick_millis must be greater than 0");
        }
        if !(0.0..=1.0).contains(&self.volume) {
            bail!("volume must be between 0 and 1, got {}", self.volume);
        }
        if self.track.duration_secs == 0 {
            bail!("track duration must be greater than 0");
        }
        for kind in ModeKind::ALL {
            if self.modes.get(kind).duration_secs == 0 {
                bail!("{} duration must be greater than 0", kind);
            }
        }
        Ok(())
    }

    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join("config.toml")
    }

    pub fn log_path(dir: &Path) -> PathBuf {
        dir.join("focusdeck.log")
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn playback_clock(&self) -> PlaybackClock {
        PlaybackClock::new(self.track.clone(), self.volume)
    }

    pub fn countdown_clock(&self) -> CountdownClock {
        CountdownClock::new(ModeKind::ALL.map(|kind| self.modes.get(kind).clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::config_path(&dir.path().join("nested"));

        let mut config = Config::default();
        config.modes.short_break.duration_secs = 420;
        config.track.title = "Night Drive".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::config_path(dir.path());
        fs::write(&path, "volume = 0.25\n\n[modes.focus]\nduration_secs = 3000\ncolor = \"#112233\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.volume, 0.25);
        assert_eq!(config.modes.focus.duration_secs, 3000);
        assert_eq!(config.modes.short_break, Mode::default_for(ModeKind::ShortBreak));
        assert_eq!(config.track, Track::default());
    }

    #[test]
    fn zero_durations_are_rejected() {
        let mut config = Config::default();
        config.modes.long_break.duration_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.track.duration_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::config_path(dir.path());
        fs::write(&path, "volume = 1.5\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn clocks_follow_config() {
        let mut config = Config::default();
        config.modes.focus.duration_secs = 60;
        config.track.duration_secs = 90;

        assert_eq!(config.countdown_clock().time_left_secs(), 60);
        assert_eq!(config.playback_clock().duration_secs(), 90);
    }
}
