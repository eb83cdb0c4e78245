//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstree/bstree.toml`
//! 3. Explicit config file: `--config <path>`
//! 4. Environment variables: `BSTREE_*` prefix, `__` between nested keys
//!    (e.g. `BSTREE_STYLE=termtree`, `BSTREE_DEMO__COUNT=20`)
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

pub const ENV_PREFIX: &str = "BSTREE";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("cannot render settings: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// How trees are drawn on the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PrintStyle {
    /// Sideways drawing, right subtree on top
    #[default]
    Odin,
    /// Top-down drawing via termtree
    Termtree,
}

/// Parameters of the demonstration run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of random values per generated tree
    pub count: usize,
    /// Smallest random value (inclusive)
    pub min: i64,
    /// Largest random value (inclusive)
    pub max: i64,
    /// Fixed RNG seed; a fresh seed is drawn when absent
    pub seed: Option<u64>,
    /// Pause for Enter between phases
    pub interactive: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            count: 15,
            min: 1,
            max: 100,
            seed: None,
            interactive: false,
        }
    }
}

/// Unified configuration for bstree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree drawing style
    pub style: PrintStyle,
    /// Demonstration parameters
    pub demo: DemoConfig,
}

/// Get the XDG config directory for bstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; unlike
    ///   the global file it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        Self::load_layers(global_config_path().as_deref(), explicit, env)
    }

    /// Merge the given layers onto the compiled defaults and validate.
    #[instrument(level = "debug", skip(env))]
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Environment,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(global) = global {
            builder = builder.add_source(File::from(global).required(false));
        }
        if let Some(explicit) = explicit {
            debug!("explicit config: {}", explicit.display());
            builder = builder.add_source(File::from(explicit).required(true));
        }

        let settings: Self = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the demo cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.demo.count == 0 {
            return Err(SettingsError::Invalid {
                key: "demo.count",
                reason: "must be at least 1".into(),
            });
        }
        if self.demo.min > self.demo.max {
            return Err(SettingsError::Invalid {
                key: "demo.min",
                reason: format!("{} exceeds demo.max {}", self.demo.min, self.demo.max),
            });
        }
        Ok(())
    }

    /// Effective settings as TOML, as they would appear in a config file.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
