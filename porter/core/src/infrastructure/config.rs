// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Porter Settings
//!
//! Runtime configuration for a porter process:
//! - gRPC listen address and per-request timeout
//! - Sephirah endpoint and outbound call timeout
//! - heartbeat timing and whether enablement requires a token exchange
//!
//! Settings come from an optional YAML file; environment variables override
//! individual fields. Malformed values are reported, never ignored.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use humantime_serde::re::humantime;
use serde::{Deserialize, Serialize};

use crate::application::porter_service::PorterOptions;
use crate::domain::session::HeartbeatPolicy;

pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_SERVER_TIMEOUT: &str = "SERVER_TIMEOUT";
pub const ENV_SEPHIRAH_ENDPOINT: &str = "SEPHIRAH_ENDPOINT";
pub const ENV_SEPHIRAH_TIMEOUT: &str = "SEPHIRAH_TIMEOUT";
pub const ENV_REQUIRE_TOKEN: &str = "PORTER_REQUIRE_TOKEN";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorterSettings {
    pub server: ServerSettings,
    pub sephirah: SephirahSettings,
    pub heartbeat: HeartbeatPolicy,
    /// Skip the token exchange on enablement when false.
    pub require_token: bool,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub address: SocketAddr,
    /// Upper bound on handling a single inbound call.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SephirahSettings {
    pub endpoint: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for PorterSettings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            sephirah: SephirahSettings::default(),
            heartbeat: HeartbeatPolicy::default(),
            require_token: true,
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], 9000)),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Default for SephirahSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:10000".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PorterSettings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse porter settings")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read porter settings from {}", path.display()))?;
        Self::from_yaml_str(&contents)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();
        settings.apply_env_overrides()?;
        Ok(settings)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn porter_options(&self) -> PorterOptions {
        PorterOptions {
            heartbeat: self.heartbeat,
            require_token: self.require_token,
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(address) = lookup(ENV_SERVER_ADDRESS) {
            self.server.address = address.parse().with_context(|| {
                format!("{ENV_SERVER_ADDRESS} is not a socket address: {address}")
            })?;
        }
        if let Some(timeout) = lookup(ENV_SERVER_TIMEOUT) {
            self.server.timeout = parse_duration(ENV_SERVER_TIMEOUT, &timeout)?;
        }
        if let Some(endpoint) = lookup(ENV_SEPHIRAH_ENDPOINT) {
            self.sephirah.endpoint = endpoint;
        }
        if let Some(timeout) = lookup(ENV_SEPHIRAH_TIMEOUT) {
            self.sephirah.timeout = parse_duration(ENV_SEPHIRAH_TIMEOUT, &timeout)?;
        }
        if let Some(flag) = lookup(ENV_REQUIRE_TOKEN) {
            self.require_token = parse_bool(ENV_REQUIRE_TOKEN, &flag)?;
        }
        Ok(())
    }
}

fn parse_duration(key: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value).with_context(|| format!("{key} is not a duration: {value}"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(anyhow!("{key} is not a boolean: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_sdk_conventions() {
        let settings = PorterSettings::default();
        assert_eq!(settings.server.timeout, Duration::from_secs(60));
        assert_eq!(settings.sephirah.timeout, Duration::from_secs(60));
        assert_eq!(settings.heartbeat.timeout, Duration::from_secs(60));
        assert!(settings.require_token);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let settings = PorterSettings::from_yaml_str(
            r#"
server:
  address: "127.0.0.1:7000"
heartbeat:
  timeout: 90s
require_token: false
"#,
        )
        .unwrap();
        assert_eq!(settings.server.address, "127.0.0.1:7000".parse().unwrap());
        assert_eq!(settings.server.timeout, Duration::from_secs(60));
        assert_eq!(settings.heartbeat.timeout, Duration::from_secs(90));
        assert_eq!(settings.heartbeat.interval, Duration::from_secs(10));
        assert!(!settings.porter_options().require_token);
    }

    #[test]
    fn settings_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sephirah:\n  endpoint: \"http://sephirah:10000\"").unwrap();

        let settings = PorterSettings::from_yaml_file(file.path()).unwrap();
        assert_eq!(settings.sephirah.endpoint, "http://sephirah:10000");
    }

    #[test]
    fn env_overrides_replace_fields() {
        let mut settings = PorterSettings::default();
        settings
            .apply_overrides(lookup(&[
                (ENV_SERVER_ADDRESS, "0.0.0.0:8123"),
                (ENV_SERVER_TIMEOUT, "30s"),
                (ENV_SEPHIRAH_ENDPOINT, "sephirah.internal:10000"),
                (ENV_REQUIRE_TOKEN, "false"),
            ]))
            .unwrap();

        assert_eq!(settings.server.address.port(), 8123);
        assert_eq!(settings.server.timeout, Duration::from_secs(30));
        assert_eq!(settings.sephirah.endpoint, "sephirah.internal:10000");
        assert!(!settings.require_token);
    }

    #[test]
    fn malformed_env_values_are_errors() {
        let mut settings = PorterSettings::default();
        assert!(settings
            .apply_overrides(lookup(&[(ENV_SERVER_TIMEOUT, "soon")]))
            .is_err());
        assert!(settings
            .apply_overrides(lookup(&[(ENV_REQUIRE_TOKEN, "maybe")]))
            .is_err());
    }
}
