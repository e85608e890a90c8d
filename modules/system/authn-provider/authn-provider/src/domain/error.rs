//! Domain errors for the `AuthN` provider.

use std::fmt;

use authn_provider_sdk::{AuthProviderError, ServiceError};

use super::decision::{LOGIN_FAILED, Rejection};

/// Which authentication check was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStage {
    Implicit,
    Explicit,
}

impl AuthStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Implicit => "implicit",
            Self::Explicit => "explicit",
        }
    }
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal faults that prevent a decision.
///
/// None of these say anything about the validity of the credentials.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("failed to open session: {0}")]
    SessionOpen(#[source] ServiceError),

    #[error("authentication service failed during {stage} check: {source}")]
    AuthenticationService {
        stage: AuthStage,
        #[source]
        source: ServiceError,
    },

    #[error("special group resolution failed: {0}")]
    SpecialGroups(#[source] ServiceError),
}

impl From<Rejection> for AuthProviderError {
    fn from(_: Rejection) -> Self {
        Self::BadCredentials(LOGIN_FAILED.to_owned())
    }
}
