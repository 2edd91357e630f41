use allme_core::recurrence::MaterializationConfig;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Owner tag every query and mutation is scoped by.
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Path to the SQLite database file.
    #[serde(default = "default_database")]
    pub database: String,
    /// Forward-generation settings for recurring series.
    #[serde(default)]
    pub recurrence: MaterializationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            database: default_database(),
            recurrence: MaterializationConfig::default(),
        }
    }
}

fn default_owner() -> String {
    "me".to_string()
}

fn default_database() -> String {
    "allme.db".to_string()
}

impl Config {
    /// Reads `allme.toml` merged with `ALLME_`-prefixed environment
    /// variables (e.g. `ALLME_DATABASE`, `ALLME_OWNER`).
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("allme.toml"))
            .merge(Env::prefixed("ALLME_"))
            .extract()
    }
}
