//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstree/bstree.toml`
//! 3. Local config: `<dir>/.bstree.toml` (directory passed with `-C`)
//! 4. Environment variables: `BSTREE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{Key, RenderStyle};

/// Settings for the demo driver sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of random keys generated for the initial tree
    pub size: usize,
    /// Random keys are drawn from `[0, max_key)`
    pub max_key: Key,
    /// First key of the ascending run inserted to skew the tree
    pub skew_start: Key,
    /// Length of the skewing run
    pub skew_count: usize,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            size: 15,
            max_key: 100,
            skew_start: 100,
            skew_count: 4,
            seed: None,
        }
    }
}

/// Settings for tree drawings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    pub style: RenderStyle,
}

/// Raw demo config for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDemoConfig {
    pub size: Option<usize>,
    pub max_key: Option<Key>,
    pub skew_start: Option<Key>,
    pub skew_count: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub style: Option<RenderStyle>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub demo: RawDemoConfig,
    pub render: RawRenderConfig,
}

/// Unified configuration for bstree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub demo: DemoConfig,
    pub render: RenderConfig,
}

/// Get the XDG config directory for bstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".bstree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let demo = &overlay.demo;
        Self {
            demo: DemoConfig {
                size: demo.size.unwrap_or(self.demo.size),
                max_key: demo.max_key.unwrap_or(self.demo.max_key),
                skew_start: demo.skew_start.unwrap_or(self.demo.skew_start),
                skew_count: demo.skew_count.unwrap_or(self.demo.skew_count),
                seed: demo.seed.or(self.demo.seed),
            },
            render: RenderConfig {
                style: overlay.render.style.unwrap_or(self.render.style),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.bstree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/bstree/bstree.toml`
    /// 3. Local config: `<local_dir>/.bstree.toml`
    /// 4. Environment variables: `BSTREE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        let env = Config::builder()
            .add_source(
                Environment::with_prefix("BSTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;
        current = Self::apply_overrides(current, &env)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply explicit overrides (environment variables) on top of `settings`.
    ///
    /// A key that is set but does not parse is an error, not a silent skip.
    fn apply_overrides(mut settings: Self, config: &Config) -> Result<Self, ApplicationError> {
        if let Some(val) = get_override::<usize>(config, "demo.size")? {
            settings.demo.size = val;
        }
        if let Some(val) = get_override::<Key>(config, "demo.max_key")? {
            settings.demo.max_key = val;
        }
        if let Some(val) = get_override::<Key>(config, "demo.skew_start")? {
            settings.demo.skew_start = val;
        }
        if let Some(val) = get_override::<usize>(config, "demo.skew_count")? {
            settings.demo.skew_count = val;
        }
        if let Some(val) = get_override::<u64>(config, "demo.seed")? {
            settings.demo.seed = Some(val);
        }
        if let Some(val) = get_override::<String>(config, "render.style")? {
            settings.render.style = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("BSTREE_RENDER__STYLE: {e}"),
            })?;
        }
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        let demo = &self.demo;
        if demo.max_key <= 0 {
            return Err(ApplicationError::Config {
                message: format!("demo.max_key must be positive, got {}", demo.max_key),
            });
        }
        // the skewing run is skew_start, skew_start + 1, ... and must stay in range
        let last_offset = Key::try_from(demo.skew_count.saturating_sub(1)).ok();
        if last_offset
            .and_then(|offset| demo.skew_start.checked_add(offset))
            .is_none()
        {
            return Err(ApplicationError::Config {
                message: format!(
                    "demo.skew_start {} with demo.skew_count {} exceeds the key range",
                    demo.skew_start, demo.skew_count
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bstree/bstree.toml
#   Local:  <dir>/.bstree.toml           (selected with -C <dir> or BSTREE_CONFIG_DIR)
#   Env:    BSTREE_* environment variables, e.g. BSTREE_DEMO__SIZE=20

[demo]
# Number of random keys in the initial tree
# size = 15

# Random keys are drawn from [0, max_key)
# max_key = 100

# Ascending run inserted to unbalance the tree
# skew_start = 100
# skew_count = 4

# Fixed seed for reproducible runs
# seed = 42

[render]
# "pretty" (sideways) or "termtree" (top-down)
# style = "pretty"
"#
        .to_string()
    }
}

/// Read an optional override; only a missing key counts as "not set".
fn get_override<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("{key}: {e}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
