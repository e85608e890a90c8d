//! Server configuration.
//!
//! Layered with figment: built-in defaults, then the YAML file given on the
//! command line, then `REPO_` environment variables (`__` separates nested
//! keys, e.g. `REPO_SERVER__BIND_ADDR`).

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use anyhow::Context;
use authn_provider::AuthnProviderConfig;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;
use static_authn_plugin::config::StaticAuthNPluginConfig;

const ENV_PREFIX: &str = "REPO_";
const REDACTED: &str = "[REDACTED]";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub authn: AuthnProviderConfig,
    pub static_authn: StaticAuthNPluginConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8087)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::new();
    if let Some(path) = path {
        figment = figment.merge(Yaml::file_exact(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the layered configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a value does not fit the
/// schema.
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    figment(path)
        .extract()
        .context("failed to load configuration")
}

/// The merged configuration as JSON, with passwords masked.
///
/// # Errors
///
/// Returns an error if the sources cannot be merged.
pub fn render(path: Option<&Path>) -> anyhow::Result<String> {
    let mut value: serde_json::Value = figment(path)
        .extract()
        .context("failed to load configuration")?;
    redact(&mut value);
    serde_json::to_string_pretty(&value).context("failed to render configuration")
}

fn redact(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if key == "password" {
                    *entry = serde_json::Value::String(REDACTED.to_owned());
                } else {
                    redact(entry);
                }
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                redact(item);
            }
        }
        _ => {}
    }
}
