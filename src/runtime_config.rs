//! # Runtime Configuration Module
//!
//! Settings that change how the dispatcher behaves at runtime.
//!
//! ## Environment Variables
//!
//! ### `ROUTEDISPATCH_DEBUG`
//!
//! When truthy (`1`, `true`, `yes`, `on`) every matched dispatch logs a line
//! of the form `GET Route: /users/7`. Default: off.
//!
//! ### `ROUTEDISPATCH_SUBDOMAINS`
//!
//! When truthy, requests that did not opt in or out themselves have subdomain
//! handling active, so routes are gated by their domain constraint.
//! Default: off.
//!
//! ## Files
//!
//! The same settings load from YAML or TOML:
//!
//! ```yaml
//! debug: true
//! activate_subdomains: false
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use routedispatch::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("debug routes: {}", config.debug);
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Runtime configuration for a [`Dispatcher`](crate::dispatcher::Dispatcher)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Log `"<METHOD> Route: <path>"` for every matched dispatch
    pub debug: bool,
    /// Default subdomain handling for requests that did not choose
    pub activate_subdomains: bool,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            debug: env_flag("ROUTEDISPATCH_DEBUG"),
            activate_subdomains: env_flag("ROUTEDISPATCH_SUBDOMAINS"),
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("invalid YAML runtime config")
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid TOML runtime config")
    }

    /// Load from a `.yaml`/`.yml` or `.toml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            other => bail!(
                "unsupported config extension {:?} for {}",
                other,
                path.display()
            ),
        }
        .with_context(|| format!("failed to load config {}", path.display()))
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|v| parse_flag(&v)).unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
