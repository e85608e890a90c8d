//! Client implementation for the static `AuthN` plugin.
//!
//! Implements `AuthenticationService` using the domain service.

use authn_provider_sdk::{
    AuthStatus, AuthenticationService, Group, RequestAttributes, ServiceError, Session,
};
use secrecy::SecretString;
use tracing::debug;

use super::service::Service;

impl AuthenticationService for Service {
    fn authenticate_implicit(
        &self,
        session: &mut dyn Session,
        _name: Option<&str>,
        _secret: Option<&SecretString>,
        request: &RequestAttributes,
    ) -> Result<AuthStatus, ServiceError> {
        let Some(addr) = request.remote_addr() else {
            return Ok(AuthStatus::BadArgs);
        };
        let Some(principal) = self.implicit_principal(addr) else {
            return Ok(AuthStatus::NoSuchUser);
        };

        debug!(session_id = session.id(), %addr, "Implicit authentication by network");
        session.set_current_principal(principal.clone());
        Ok(AuthStatus::Success)
    }

    fn authenticate(
        &self,
        session: &mut dyn Session,
        name: &str,
        secret: &SecretString,
        _request: &RequestAttributes,
    ) -> Result<AuthStatus, ServiceError> {
        match self.verify(name, secret) {
            Ok(principal) => {
                session.set_current_principal(principal.clone());
                Ok(AuthStatus::Success)
            }
            Err(status) => Ok(status),
        }
    }

    fn special_groups(
        &self,
        _session: &dyn Session,
        request: &RequestAttributes,
    ) -> Result<Vec<Group>, ServiceError> {
        Ok(request
            .remote_addr()
            .map_or_else(Vec::new, |addr| self.groups_for(addr)))
    }
}
