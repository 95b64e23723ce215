use std::path::Path;

use anyhow::Result;

use crate::clock::{format, ModeKind};
use crate::state::Config;

pub fn show_config(dir: &Path) -> Result<()> {
    let path = Config::config_path(dir);
    let config = Config::load_or_default(dir)?;

    if path.exists() {
        println!("\nConfig: {:?}", path);
    } else {
        println!("\nConfig: defaults (no {:?})", path);
    }
    println!("Tick: {} ms", config.tick_millis);

    let track = &config.track;
    println!("\nTrack:");
    println!(
        "  [{}] {} - {}",
        format::m_ss(track.duration_secs),
        track.title,
        track.artist
    );
    println!("  Volume: {}%", format::percent(config.volume));

    println!("\nModes:");
    for (i, kind) in ModeKind::ALL.into_iter().enumerate() {
        let mode = config.modes.get(kind);
        println!(
            "{}. [{}] {} {}",
            i + 1,
            format::mm_ss(mode.duration_secs),
            kind,
            mode.color
        );
    }

    Ok(())
}
