use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use map_core::{ResolverOptions, DEFAULT_ROUTING_TIMEOUT, DEFAULT_ROUTING_URL};
use serde::Deserialize;
use shared::{
    domain::{GeoPoint, DEFAULT_DESTINATION},
    protocol::DEFAULT_PROFILE,
};

pub const DEFAULT_SETTINGS_FILE: &str = "route_viewer.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub routing_url: String,
    pub routing_profile: String,
    pub routing_timeout_secs: u64,
    pub destination: GeoPoint,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            routing_url: DEFAULT_ROUTING_URL.into(),
            routing_profile: DEFAULT_PROFILE.into(),
            routing_timeout_secs: DEFAULT_ROUTING_TIMEOUT.as_secs(),
            destination: DEFAULT_DESTINATION,
        }
    }
}

impl Settings {
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            base_url: self.routing_url.clone(),
            profile: self.routing_profile.clone(),
            timeout: Duration::from_secs(self.routing_timeout_secs),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.destination.is_valid() {
            bail!(
                "destination out of range: lat={} lon={}",
                self.destination.latitude,
                self.destination.longitude
            );
        }
        if self.routing_timeout_secs == 0 {
            bail!("routing_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    routing_url: Option<String>,
    routing_profile: Option<String>,
    routing_timeout_secs: Option<u64>,
    destination_latitude: Option<f64>,
    destination_longitude: Option<f64>,
}

/// Defaults, then the settings file (if present), then `APP__*` environment variables.
/// Fails if the merged destination or timeout is unusable.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings.validate().context("invalid route viewer settings")?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.routing_url {
        settings.routing_url = v;
    }
    if let Some(v) = file_cfg.routing_profile {
        settings.routing_profile = v;
    }
    if let Some(v) = file_cfg.routing_timeout_secs {
        settings.routing_timeout_secs = v;
    }
    if let Some(v) = file_cfg.destination_latitude {
        settings.destination.latitude = v;
    }
    if let Some(v) = file_cfg.destination_longitude {
        settings.destination.longitude = v;
    }

    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__ROUTING_URL") {
        settings.routing_url = v;
    }
    if let Some(v) = lookup("APP__ROUTING_PROFILE") {
        settings.routing_profile = v;
    }
    if let Some(v) = lookup("APP__ROUTING_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.routing_timeout_secs = parsed;
        }
    }
    if let Some(v) = lookup("APP__DESTINATION_LATITUDE") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.destination.latitude = parsed;
        }
    }
    if let Some(v) = lookup("APP__DESTINATION_LONGITUDE") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.destination.longitude = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
