//! Collaborator traits consumed by the credential authenticator.
//!
//! Implementations live in plugins (see `static-authn-plugin`) or in the
//! host application; the authenticator receives them through its constructor.

use secrecy::SecretString;

use crate::error::ServiceError;
use crate::models::{AuthStatus, Group, Principal, RequestAttributes};

/// A unit of work bound to one authentication attempt.
///
/// A session is owned by exactly one attempt, is never shared between
/// requests, and must be completed exactly once.
pub trait Session: Send {
    /// Identifier used to correlate audit entries.
    fn id(&self) -> &str;

    /// The principal bound by a successful authentication check, if any.
    fn current_principal(&self) -> Option<&Principal>;

    /// Bind the authenticated principal. Called by authentication services.
    fn set_current_principal(&mut self, principal: Principal);

    /// Commit and release the session.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the session cannot be committed or was
    /// already completed.
    fn complete(&mut self) -> Result<(), ServiceError>;
}

/// Opens sessions for authentication attempts.
pub trait SessionFactory: Send + Sync {
    /// Open a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the backing store is unavailable.
    fn open(&self) -> Result<Box<dyn Session>, ServiceError>;
}

/// The user-management service credentials are checked against.
///
/// On `AuthStatus::Success` the service binds the authenticated principal
/// to the session via [`Session::set_current_principal`].
pub trait AuthenticationService: Send + Sync {
    /// Establish identity from ambient request context only
    /// (trusted network, client certificate, upstream SSO).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on faults unrelated to credential validity.
    fn authenticate_implicit(
        &self,
        session: &mut dyn Session,
        name: Option<&str>,
        secret: Option<&SecretString>,
        request: &RequestAttributes,
    ) -> Result<AuthStatus, ServiceError>;

    /// Establish identity from a submitted name/secret pair.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on faults unrelated to credential validity.
    fn authenticate(
        &self,
        session: &mut dyn Session,
        name: &str,
        secret: &SecretString,
        request: &RequestAttributes,
    ) -> Result<AuthStatus, ServiceError>;

    /// Groups granted dynamically from request context rather than stored
    /// membership.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if group resolution fails.
    fn special_groups(
        &self,
        session: &dyn Session,
        request: &RequestAttributes,
    ) -> Result<Vec<Group>, ServiceError>;
}
