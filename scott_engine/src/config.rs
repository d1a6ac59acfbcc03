//! Engine configuration and loader.
//!
//! Settings come from a TOML file; every field has a default, so an empty or
//! partial file is fine. The file is looked up in this order:
//! 1. an explicit path (the `--config` option)
//! 2. the `SCOTT_CONFIG` environment variable
//! 3. `scott.toml` in the working directory
//!
//! A missing `scott.toml` just means defaults. An explicit path that cannot be
//! read or parsed is an error.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SCOTT_CONFIG";

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "scott.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub display: DisplayConfig,
    pub play: PlayConfig,
}

/// How output is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Wrap width for game text; 0 uses the terminal width.
    pub width: usize,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { width: 72, color: true }
    }
}

/// How turns are run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Describe the room again whenever the player ends up somewhere new.
    pub auto_look: bool,
    /// Run the automatic actions once per turn.
    pub ambient_each_turn: bool,
    /// Warn when the light source is about to run out.
    pub light_warnings: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            auto_look: true,
            ambient_each_turn: true,
            light_warnings: true,
        }
    }
}

/// Where a config file came from, which decides whether a missing file is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Environment(PathBuf),
    WorkingDir(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Environment(path) | ConfigSource::WorkingDir(path) => path,
        }
    }
}

/// Pick the config file to use, if any.
pub fn find_config(explicit: Option<&Path>, env_value: Option<PathBuf>, working_dir: &Path) -> Option<ConfigSource> {
    if let Some(path) = explicit {
        return Some(ConfigSource::Explicit(path.to_path_buf()));
    }
    if let Some(path) = env_value.filter(|p| !p.as_os_str().is_empty()) {
        return Some(ConfigSource::Environment(path));
    }
    let local = working_dir.join(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(ConfigSource::WorkingDir(local))
}

/// Load the configuration for this process.
///
/// # Errors
/// An explicit or environment-named file that cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    let working_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_value = env::var_os(CONFIG_ENV).map(PathBuf::from);
    match find_config(explicit, env_value, &working_dir) {
        None => {
            info!("no config file found, using defaults");
            Ok(EngineConfig::default())
        },
        Some(ConfigSource::WorkingDir(path)) => match load_config_file(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Could not load config from '{}': {e:#}. Using defaults.", path.display());
                Ok(EngineConfig::default())
            },
        },
        Some(source) => load_config_file(source.path()),
    }
}

/// Read and parse one config file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading config from '{}'", path.display()))?;
    let config: EngineConfig =
        toml::from_str(&text).with_context(|| format!("parsing config from '{}'", path.display()))?;
    info!("config loaded from '{}'", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config("[display]\nwidth = 40\n");
        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.display.width, 40);
        assert!(config.display.color);
        assert_eq!(config.play, PlayConfig::default());
    }

    #[test]
    fn full_file_overrides_everything() {
        let file = write_config(
            "[display]\nwidth = 0\ncolor = false\n\n[play]\nauto_look = false\nambient_each_turn = false\nlight_warnings = false\n",
        );
        let config = load_config_file(file.path()).unwrap();
        assert_eq!(
            config,
            EngineConfig {
                display: DisplayConfig { width: 0, color: false },
                play: PlayConfig {
                    auto_look: false,
                    ambient_each_turn: false,
                    light_warnings: false,
                },
            }
        );
    }

    #[test]
    fn malformed_file_reports_path() {
        let file = write_config("[display]\nwidth = \"wide\"\n");
        let err = load_config_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains(&file.path().display().to_string()));
    }

    #[test]
    fn lookup_order() {
        let dir = tempdir().unwrap();
        let explicit = Path::new("/tmp/explicit.toml");
        let from_env = PathBuf::from("/tmp/env.toml");

        assert_eq!(
            find_config(Some(explicit), Some(from_env.clone()), dir.path()),
            Some(ConfigSource::Explicit(explicit.to_path_buf()))
        );
        assert_eq!(
            find_config(None, Some(from_env.clone()), dir.path()),
            Some(ConfigSource::Environment(from_env))
        );
        assert_eq!(find_config(None, None, dir.path()), None);

        let local = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&local, "").unwrap();
        assert_eq!(find_config(None, None, dir.path()), Some(ConfigSource::WorkingDir(local)));
    }
}
