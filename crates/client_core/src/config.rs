use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

use crate::{error::Result, transport::parse_base_url};

pub const DEFAULT_CONFIG_FILE: &str = "board.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub server_url: String,
    pub poll_interval_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            poll_interval_ms: 1000,
        }
    }
}

impl ClientSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        parse_base_url(&self.server_url).map(|_| ())
    }

    /// Overlays values from a TOML document. Unknown keys and values of the
    /// wrong shape are ignored.
    pub fn apply_toml(&mut self, raw: &str) -> anyhow::Result<()> {
        let table: toml::Table = raw.parse().context("config file is not valid TOML")?;

        if let Some(v) = table.get("server_url").and_then(toml::Value::as_str) {
            self.server_url = v.to_string();
        }
        match table.get("poll_interval_ms") {
            Some(toml::Value::Integer(ms)) => self.set_poll_interval(u64::try_from(*ms).ok()),
            Some(toml::Value::String(ms)) => self.set_poll_interval(ms.trim().parse().ok()),
            _ => {}
        }
        Ok(())
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("TODO_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("APP__SERVER_URL") {
            self.server_url = v;
        }

        if let Some(v) = lookup("APP__POLL_INTERVAL_MS") {
            self.set_poll_interval(v.trim().parse().ok());
        }
    }

    fn set_poll_interval(&mut self, ms: Option<u64>) {
        if let Some(ms) = ms.filter(|ms| *ms > 0) {
            self.poll_interval_ms = ms;
        }
    }
}

/// Defaults, then the config file, then the environment.
///
/// A missing default file is fine; a missing file that was asked for by path
/// is an error.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => settings
            .apply_toml(&raw)
            .with_context(|| format!("failed to load settings from '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound && !required => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
