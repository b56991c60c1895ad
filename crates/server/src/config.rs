use std::{
    collections::HashMap,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: String,
    pub dataset_path: PathBuf,
    pub log_filter: String,
    pub with_log_measures: bool,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8052".into(),
            dataset_path: PathBuf::from("COVID-19_Death_Counts.csv"),
            log_filter: "info".into(),
            with_log_measures: false,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Settings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind_addr))
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(CONFIG_FILE), std::env::vars().collect())
}

/// Defaults, then the optional TOML file, then `APP__*` variables, then the
/// short `DASHBOARD_*` overrides.
pub fn load_settings_from(
    file: &Path,
    env: HashMap<String, String>,
) -> anyhow::Result<Settings> {
    let mut settings: Settings = Config::builder()
        .add_source(File::from(file).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        )
        .build()
        .with_context(|| format!("failed to read settings from '{}'", file.display()))?
        .try_deserialize()
        .context("invalid dashboard settings")?;

    if let Some(v) = env.get("DASHBOARD_BIND") {
        settings.bind_addr = v.clone();
    }
    if let Some(v) = env.get("DASHBOARD_DATASET") {
        settings.dataset_path = PathBuf::from(v);
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
