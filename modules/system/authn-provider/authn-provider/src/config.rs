//! Configuration for the `AuthN` provider.

use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthnProviderConfig {
    /// Realm advertised in `WWW-Authenticate` challenges.
    pub realm: String,

    /// Take the client address from the first `X-Forwarded-For` entry.
    ///
    /// Only enable behind a reverse proxy that overwrites the header, since
    /// implicit authentication trusts this address.
    pub trust_forwarded_for: bool,
}

impl Default for AuthnProviderConfig {
    fn default() -> Self {
        Self {
            realm: "repository".to_owned(),
            trust_forwarded_for: false,
        }
    }
}
