//! Domain models for the `AuthN` provider module.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a single authentication check.
///
/// Produced by the [`AuthenticationService`](crate::AuthenticationService) and
/// consumed immediately; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    Success,
    BadCredentials,
    CertRequired,
    NoSuchUser,
    BadArgs,
}

impl AuthStatus {
    /// Stable numeric code recorded in audit entries.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 1,
            Self::BadCredentials => 2,
            Self::CertRequired => 3,
            Self::NoSuchUser => 4,
            Self::BadArgs => 5,
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::BadCredentials => "bad_credentials",
            Self::CertRequired => "cert_required",
            Self::NoSuchUser => "no_such_user",
            Self::BadArgs => "bad_args",
        };
        f.write_str(name)
    }
}

/// A named collection of granted permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
}

impl Group {
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The user bound to a session after a successful authentication check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: Option<String>,
}

impl Principal {
    #[must_use]
    pub fn new(id: Uuid, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// The email address, unless it is absent or blank.
    #[must_use]
    pub fn usable_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.trim().is_empty())
    }
}

/// Ambient request context available to implicit authentication methods.
///
/// Header names are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestAttributes {
    remote_addr: Option<IpAddr>,
    headers: BTreeMap<String, String>,
    session_id: Option<String>,
}

impl RequestAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    #[must_use]
    pub fn remote_addr(&self) -> Option<IpAddr> {
        self.remote_addr
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}
