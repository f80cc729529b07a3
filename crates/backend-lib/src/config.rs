// ============================
// netguessr-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Path to the celebrity net-worth dataset (celebs.json)
    pub celebs_path: PathBuf,
    /// Seconds of member inactivity before a prune pass drops them
    pub prune_after_secs: u64,
    /// Log level filter handed to tracing-subscriber
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().expect("static addr"),
            celebs_path: PathBuf::from("celebs.json"),
            prune_after_secs: 300,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from("config/default.toml")
    }

    /// Load settings layered over the defaults: TOML file first, then
    /// `NETGUESSR_`-prefixed environment variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("NETGUESSR_"))
            .extract()?;

        Ok(settings)
    }
}
