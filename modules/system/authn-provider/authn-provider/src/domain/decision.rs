//! The three-way result of an authentication attempt.

use authn_provider_sdk::{AuthStatus, IdentityToken};

use super::error::{AuthStage, DomainError};

/// Generic message for every rejection. Does not reveal the failing stage or
/// whether the name exists.
pub const LOGIN_FAILED: &str = "Login failed";

/// Why credentials were rejected. Kept for logs and tests only; callers see
/// [`LOGIN_FAILED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Implicit authentication did not apply and the explicit check failed.
    Failed { status: AuthStatus },
    /// A check reported success but bound no principal with a usable email.
    NoUsablePrincipal { stage: AuthStage },
}

/// Result of [`Service::authenticate`](super::Service::authenticate).
#[derive(Debug)]
pub enum AuthDecision {
    /// Credentials (or ambient context) identified a usable principal.
    Authenticated(IdentityToken),
    /// Credentials were rejected; the caller must stop and report failure.
    Rejected(Rejection),
    /// An internal fault prevented a decision; already logged.
    Indeterminate(DomainError),
}

impl AuthDecision {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate(_))
    }
}
