use core::fmt::{Debug, Display};
use std::net::SocketAddr;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "olympics.toml";
pub const ENV_PREFIX: &str = "OLYMPICS_";

/// One collection per entity kind, all inside [`StoreConfig::database_id`].
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CollectionIds {
    pub athletes: String,
    pub events: String,
    pub tally: String,
    pub breaking_news: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub project_id: String,
    /// Server key. Without it requests run with the project's guest permissions.
    pub api_key: Option<String>,
    pub database_id: String,
    pub collections: CollectionIds,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ListingMode {
    /// Fetch up to 1000 documents and slice pages out of memory.
    #[default]
    FullFetch,
    /// Ask the store for exactly one page.
    Paged,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// At least 64 bytes. A random key is generated when missing, which logs
    /// everybody out on restart.
    pub cookie_secret: Option<String>,
    #[serde(default)]
    pub listing: ListingMode,
    pub store: StoreConfig,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_owned()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[must_use]
pub fn figment() -> Figment {
    Figment::new()
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn get_config() -> Result<Config, ConfigError> {
    Ok(figment().extract()?)
}
