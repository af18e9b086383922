//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dirs_next::{config_dir, home_dir};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app::locate::DEFAULT_LOOKBACK_DAYS;
use crate::domain::format::{DEFAULT_INDENT_WIDTH, EntryFormat, EntryLayout};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

const ENV_BASE_DIR: &str = "DAILY_BASE_DIR";
const ENV_LOOKBACK_DAYS: &str = "DAILY_LOOKBACK_DAYS";

/// Layered configuration loaded from defaults, user config, an explicit file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub journal: Journal,
    #[serde(default)]
    pub format: Format,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Journal {
    #[serde(default)]
    base_dir: Option<PathBuf>,
    #[serde(default)]
    lookback_days: Option<u32>,
    #[serde(default)]
    template: Option<PathBuf>,
}

impl Journal {
    /// Base directory with a leading `~` expanded to the home directory.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.base_dir.as_deref().map(expand_home)
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS)
    }

    pub fn template(&self) -> Option<PathBuf> {
        self.template.as_deref().map(expand_home)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Format {
    #[serde(default)]
    indent_width: Option<usize>,
}

impl Format {
    pub fn indent_width(&self) -> usize {
        self.indent_width.unwrap_or(DEFAULT_INDENT_WIDTH)
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    base_dir: Option<PathBuf>,
    lookback_days: Option<u32>,
}

impl EnvOverrides {
    fn from_env() -> Result<Self> {
        let lookback_days = match env::var(ENV_LOOKBACK_DAYS) {
            Ok(raw) => Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("{ENV_LOOKBACK_DAYS} must be a number, got '{raw}'"))?,
            ),
            Err(_) => None,
        };
        Ok(Self {
            base_dir: env::var_os(ENV_BASE_DIR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            lookback_days,
        })
    }

    #[cfg(test)]
    fn for_tests(base_dir: &str, lookback_days: u32) -> Self {
        Self {
            base_dir: Some(PathBuf::from(base_dir)),
            lookback_days: Some(lookback_days),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the user config file, an optional explicit file, and
    /// env overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env()?;
        Self::load_with_layers(global_config_path(), explicit.map(Path::to_path_buf), env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        explicit: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading user config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(explicit_path) = explicit {
            tracing::debug!(path = %explicit_path.display(), "loading config file");
            layers.push(Self::from_file(&explicit_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        let config = apply_env_overrides(merged, env_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            journal: merge_journal(self.journal, other.journal),
            format: Format {
                indent_width: other.format.indent_width.or(self.format.indent_width),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.format.indent_width() == 0 {
            bail!("format.indent_width must be at least 1");
        }
        Ok(())
    }

    /// Replace the base directory, typically from a command-line flag.
    pub fn with_base_dir(mut self, base_dir: Option<PathBuf>) -> Self {
        if base_dir.is_some() {
            self.journal.base_dir = base_dir;
        }
        self
    }

    pub fn layout(&self) -> EntryLayout {
        EntryLayout::new(self.journal.base_dir())
    }

    pub fn entry_format(&self) -> EntryFormat {
        EntryFormat::with_indent_width(self.format.indent_width())
    }
}

fn merge_journal(mut base: Journal, overlay: Journal) -> Journal {
    if let Some(value) = overlay.base_dir {
        base.base_dir = Some(value);
    }
    if let Some(value) = overlay.lookback_days {
        base.lookback_days = Some(value);
    }
    if let Some(value) = overlay.template {
        base.template = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("daily/config.toml"))
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(base_dir) = env.base_dir {
        config.journal.base_dir = Some(base_dir);
    }
    if let Some(lookback_days) = env.lookback_days {
        config.journal.lookback_days = Some(lookback_days);
    }
    config
}
