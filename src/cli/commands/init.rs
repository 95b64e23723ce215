use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use crate::state::Config;

pub fn run(dir: &Path, force: bool) -> Result<()> {
    let path = Config::config_path(dir);
    if path.exists() && !force {
        bail!(
            "Config already exists at {:?}. Use 'focusdeck init --force' to overwrite.",
            path
        );
    }

    let config = Config::default();
    config.save(&path)?;
    info!(?path, "wrote default config");

    println!("Initialized focusdeck config");
    println!("  Config: {:?}", path);

    Ok(())
}
