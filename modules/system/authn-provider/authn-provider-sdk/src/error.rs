//! Error types for the `AuthN` provider module.

use thiserror::Error;

/// Errors surfaced by an [`AuthenticationProvider`](crate::AuthenticationProvider).
#[derive(Debug, Error)]
pub enum AuthProviderError {
    /// The credentials did not identify a usable principal.
    ///
    /// The message is deliberately generic and safe to show to end users.
    #[error("{0}")]
    BadCredentials(String),

    /// None of the configured providers reached a decision.
    #[error("no authentication provider reached a decision")]
    NoProviderDecided,
}

/// Errors raised by the collaborators the authenticator depends on
/// (authentication service, session lifecycle).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backing service or store cannot be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The session could not be opened or completed.
    #[error("session error: {0}")]
    Session(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
