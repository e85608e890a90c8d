use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// A single authority granted to an authenticated principal.
///
/// Authorities are opaque identifiers; for repository logins they carry the
/// name of a special group the request was placed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    #[must_use]
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `IdentityToken` is the result of a successful authentication handed to the web layer.
///
/// It carries the principal identifier (an email address for repository users),
/// the secret that was presented (kept only because the token shape expects it)
/// and the authorities granted for this request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityToken {
    /// Principal identifier, e.g. `alice@example.org`.
    principal: String,
    /// Secret presented during authentication. Never serialized/persisted.
    /// Wrapped in `SecretString` so `Debug` redacts the value automatically.
    #[serde(skip)]
    credentials: Option<SecretString>,
    /// Authorities granted for this request, in resolution order.
    #[serde(default)]
    authorities: Vec<GrantedAuthority>,
}

impl IdentityToken {
    /// Create a new `IdentityToken` builder
    #[must_use]
    pub fn builder() -> IdentityTokenBuilder {
        IdentityTokenBuilder::default()
    }

    /// Get the principal identifier
    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Get the secret presented during authentication, if it is still held.
    #[must_use]
    pub fn credentials(&self) -> Option<&SecretString> {
        self.credentials.as_ref()
    }

    /// Get the granted authorities.
    #[must_use]
    pub fn authorities(&self) -> &[GrantedAuthority] {
        &self.authorities
    }

    /// Whether the given authority was granted.
    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == authority)
    }

    /// Drop the held secret once it is no longer needed downstream.
    #[must_use]
    pub fn erase_credentials(self) -> Self {
        Self {
            credentials: None,
            ..self
        }
    }
}

#[derive(Default)]
pub struct IdentityTokenBuilder {
    principal: Option<String>,
    credentials: Option<SecretString>,
    authorities: Vec<GrantedAuthority>,
}

impl IdentityTokenBuilder {
    #[must_use]
    pub fn principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: SecretString) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn authorities(mut self, authorities: Vec<GrantedAuthority>) -> Self {
        self.authorities = authorities;
        self
    }

    #[must_use]
    pub fn build(self) -> IdentityToken {
        IdentityToken {
            principal: self.principal.unwrap_or_default(),
            credentials: self.credentials,
            authorities: self.authorities,
        }
    }
}
