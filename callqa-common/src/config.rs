//! Dashboard configuration loading
//!
//! Configuration is an explicit struct handed to each component at
//! construction. Every option has a built-in default, so a missing file or a
//! partial file is always usable.
//!
//! Resolution priority (highest first):
//! 1. Command-line `--config` path
//! 2. `CALLQA_CONFIG` environment variable
//! 3. `<user config dir>/callqa/config.toml`
//! 4. Built-in defaults

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "CALLQA_CONFIG";

/// Default transport skip interval (seconds)
pub const DEFAULT_SKIP_INTERVAL_SECS: f64 = 10.0;

/// Default transcript highlight duration (milliseconds)
pub const DEFAULT_HIGHLIGHT_DURATION_MS: u64 = 2000;

/// Default delay before print export (milliseconds)
pub const DEFAULT_PRINT_DELAY_MS: u64 = 500;

/// Dashboard configuration
///
/// ```toml
/// skip_interval_secs = 5
/// highlight_duration_ms = 1500
///
/// [endpoints]
/// report2 = "/api/report2"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Logical resource name → URL overrides
    ///
    /// Names: metadata, report, report2, transcript, audio, qcscore
    pub endpoints: BTreeMap<String, String>,

    /// Seconds moved by the skip forward/back transport buttons
    pub skip_interval_secs: f64,

    /// How long a transcript entry stays highlighted after a timestamp click
    pub highlight_duration_ms: u64,

    /// Delay between an export request and the print snapshot
    pub print_delay_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoints: BTreeMap::new(),
            skip_interval_secs: DEFAULT_SKIP_INTERVAL_SECS,
            highlight_duration_ms: DEFAULT_HIGHLIGHT_DURATION_MS,
            print_delay_ms: DEFAULT_PRINT_DELAY_MS,
        }
    }
}

impl DashboardConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Skip interval in seconds, falling back to the default when the
    /// configured value is negative, zero or not finite
    pub fn skip_interval(&self) -> f64 {
        if self.skip_interval_secs.is_finite() && self.skip_interval_secs > 0.0 {
            self.skip_interval_secs
        } else {
            warn!(
                value = self.skip_interval_secs,
                "Invalid skip_interval_secs, using default"
            );
            DEFAULT_SKIP_INTERVAL_SECS
        }
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_duration_ms)
    }

    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.print_delay_ms)
    }

    /// Endpoint override for a logical resource name, if configured
    pub fn endpoint(&self, name: &str) -> Option<&str> {
        self.endpoints
            .get(name)
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }
}

/// Resolve dashboard configuration following the documented priority order
///
/// An explicitly named file (argument or environment variable) must load;
/// the implicit per-user file is optional.
pub fn resolve_config(cli_arg: Option<&Path>, env_var_name: &str) -> Result<DashboardConfig> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        info!("Loading configuration from {}", path.display());
        return DashboardConfig::load_file(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            info!("Loading configuration from ${} = {}", env_var_name, path);
            return DashboardConfig::load_file(Path::new(&path));
        }
    }

    // Priority 3: Per-user config file
    if let Some(path) = user_config_path() {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            return DashboardConfig::load_file(&path);
        }
        debug!("No user config at {}", path.display());
    }

    // Priority 4: Built-in defaults
    Ok(DashboardConfig::default())
}

/// Per-user configuration file location for the platform
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("callqa").join("config.toml"))
}
