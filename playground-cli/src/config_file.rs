use std::path::{Path, PathBuf};

use anyhow::Context;
use playground_core::PlaygroundConfig;

pub const CONFIG_FILE_NAME: &str = "playground.toml";

/// Find the nearest `playground.toml`, walking up from `start`.
pub fn discover_config_from(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<PlaygroundConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    PlaygroundConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid config in {}", path.display()))
}

/// Load the explicit config path if given, otherwise the discovered one,
/// otherwise defaults. Returns the path that was used.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<(PlaygroundConfig, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_from(&std::env::current_dir()?),
    };
    match path {
        Some(path) => Ok((load_config(&path)?, Some(path))),
        None => Ok((PlaygroundConfig::default(), None)),
    }
}

/// Write the default config into `dir`. Refuses to overwrite unless `force`.
pub fn write_default(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists.\n\
             Pass --force to overwrite it.",
            path.display()
        );
    }
    std::fs::create_dir_all(dir)?;
    let content = PlaygroundConfig::default().to_toml_string()?;
    std::fs::write(&path, content)?;
    Ok(path)
}
