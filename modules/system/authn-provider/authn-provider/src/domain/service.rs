//! Credential authenticator for the REST API.

use std::sync::Arc;

use authn_provider_sdk::{
    AuthenticationService, Credential, IdentityToken, Principal, RequestAttributes, Session,
    SessionFactory,
};
use repo_security::GrantedAuthority;
use tracing::{error, info};

use super::decision::{AuthDecision, Rejection};
use super::error::{AuthStage, DomainError};
use super::session_guard::SessionGuard;

/// Target for login audit entries.
pub const AUDIT_TARGET: &str = "authn_provider::audit";

/// Decides whether a submitted credential pair identifies a usable principal
/// and which authorities to grant.
///
/// Implicit (ambient) authentication is tried first and wins when it
/// succeeds; otherwise the name/secret pair is checked explicitly.
pub struct Service {
    auth_service: Arc<dyn AuthenticationService>,
    sessions: Arc<dyn SessionFactory>,
}

impl Service {
    #[must_use]
    pub fn new(
        auth_service: Arc<dyn AuthenticationService>,
        sessions: Arc<dyn SessionFactory>,
    ) -> Self {
        Self {
            auth_service,
            sessions,
        }
    }

    /// Authenticate a credential pair in the context of one request.
    ///
    /// Opens a session for the attempt and completes it before returning,
    /// whatever the outcome.
    pub fn authenticate(
        &self,
        credential: &Credential,
        request: &RequestAttributes,
    ) -> AuthDecision {
        let session = match self.sessions.open() {
            Ok(session) => session,
            Err(e) => {
                let err = DomainError::SessionOpen(e);
                error!(error = %err, "Error while authenticating in the REST API");
                return AuthDecision::Indeterminate(err);
            }
        };

        let mut guard = SessionGuard::new(session);
        let decision = match self.decide(guard.session_mut(), credential, request) {
            Ok(decision) => decision,
            Err(err) => {
                error!(
                    error = %err,
                    remote_addr = ?request.remote_addr(),
                    "Error while authenticating in the REST API"
                );
                AuthDecision::Indeterminate(err)
            }
        };
        guard.close();

        decision
    }

    fn decide(
        &self,
        session: &mut dyn Session,
        credential: &Credential,
        request: &RequestAttributes,
    ) -> Result<AuthDecision, DomainError> {
        // Name and secret are never handed to the implicit check.
        let implicit = self
            .auth_service
            .authenticate_implicit(session, None, None, request)
            .map_err(|source| DomainError::AuthenticationService {
                stage: AuthStage::Implicit,
                source,
            })?;
        if implicit.is_success() {
            return self.grant(session, credential, request, AuthStage::Implicit);
        }

        let explicit = self
            .auth_service
            .authenticate(session, credential.name(), credential.secret(), request)
            .map_err(|source| DomainError::AuthenticationService {
                stage: AuthStage::Explicit,
                source,
            })?;
        if explicit.is_success() {
            return self.grant(session, credential, request, AuthStage::Explicit);
        }

        info!(
            target: AUDIT_TARGET,
            action = "failed_login",
            session_id = session.id(),
            remote_addr = ?request.remote_addr(),
            email = credential.name(),
            result = explicit.code(),
            "Login failed"
        );
        Ok(AuthDecision::Rejected(Rejection::Failed { status: explicit }))
    }

    fn grant(
        &self,
        session: &dyn Session,
        credential: &Credential,
        request: &RequestAttributes,
        stage: AuthStage,
    ) -> Result<AuthDecision, DomainError> {
        let authorities = self.special_authorities(session, request)?;

        let Some(email) = session.current_principal().and_then(Principal::usable_email) else {
            info!(
                target: AUDIT_TARGET,
                action = "failed_login",
                session_id = session.id(),
                remote_addr = ?request.remote_addr(),
                kind = stage.as_str(),
                "No principal with a non-blank email address found"
            );
            return Ok(AuthDecision::Rejected(Rejection::NoUsablePrincipal { stage }));
        };

        let token = IdentityToken::builder()
            .principal(email)
            .credentials(credential.secret().clone())
            .authorities(authorities)
            .build();

        info!(
            target: AUDIT_TARGET,
            action = "login",
            session_id = session.id(),
            remote_addr = ?request.remote_addr(),
            kind = stage.as_str(),
            email = token.principal(),
            "Login succeeded"
        );
        Ok(AuthDecision::Authenticated(token))
    }

    /// One authority per special group, named after the group.
    fn special_authorities(
        &self,
        session: &dyn Session,
        request: &RequestAttributes,
    ) -> Result<Vec<GrantedAuthority>, DomainError> {
        let groups = self
            .auth_service
            .special_groups(session, request)
            .map_err(DomainError::SpecialGroups)?;

        Ok(groups
            .into_iter()
            .map(|group| GrantedAuthority::new(group.name))
            .collect())
    }
}
