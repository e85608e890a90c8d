//! Configuration for the static `AuthN` plugin.

use ipnet::IpNet;
use secrecy::SecretString;
use serde::Deserialize;
use uuid::Uuid;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthNPluginConfig {
    /// Password accounts checked by explicit authentication.
    pub accounts: Vec<AccountConfig>,

    /// Trusted networks used for implicit authentication and special groups.
    pub networks: Vec<NetworkConfig>,
}

/// A password account.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Stable account id. Generated at startup when omitted.
    #[serde(default)]
    pub id: Option<Uuid>,

    /// Login name, matched case-insensitively.
    pub email: String,

    pub password: SecretString,

    /// Disabled accounts are refused with `BadArgs`.
    #[serde(default = "default_can_log_in")]
    pub can_log_in: bool,
}

/// A trusted network.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    pub cidr: IpNet,

    /// Account implicitly authenticated for requests from this network.
    #[serde(default)]
    pub email: Option<String>,

    /// Special groups granted to every request from this network.
    #[serde(default)]
    pub groups: Vec<String>,
}

const fn default_can_log_in() -> bool {
    true
}
