use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::SedbotConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["sedbot.toml", "sedbot.yaml", "sedbot.yml", "sedbot.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<SedbotConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./sedbot.{toml,yaml,yml,json}`
/// 2. `~/.config/sedbot/sedbot.{toml,yaml,yml,json}`
///
/// Returns `SedbotConfig::default()` if no file is found or it fails to load.
pub fn discover_and_load() -> SedbotConfig {
    let Some(path) = find_config_file() else {
        debug!("no config file found, using defaults");
        return SedbotConfig::default();
    };
    debug!(path = %path.display(), "loading config");
    load_config(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
        SedbotConfig::default()
    })
}

/// First existing config file in the standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILENAMES.iter().map(PathBuf::from);
    let global = config_dir()
        .into_iter()
        .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name)));
    local.chain(global).find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/sedbot/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "sedbot").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<SedbotConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
