//! Provider adapter exposing the credential authenticator to the web layer.

use std::sync::Arc;

use authn_provider_sdk::{
    AuthProviderError, AuthenticationProvider, AuthenticationRequest, IdentityToken,
    RequestAttributes, TokenShape,
};
use tracing::debug;

use super::decision::AuthDecision;
use super::service::Service;

/// Name/secret provider backed by [`Service`].
///
/// Rejections become `BadCredentials`; internal faults become "no decision"
/// so that other providers in the chain still get a chance.
pub struct RestAuthenticationProvider {
    svc: Arc<Service>,
}

impl RestAuthenticationProvider {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

impl AuthenticationProvider for RestAuthenticationProvider {
    fn authenticate(
        &self,
        request: &AuthenticationRequest,
        attrs: &RequestAttributes,
    ) -> Result<Option<IdentityToken>, AuthProviderError> {
        let AuthenticationRequest::UsernamePassword(credential) = request else {
            debug!(shape = ?request.shape(), "Request shape not handled by REST provider");
            return Ok(None);
        };

        match self.svc.authenticate(credential, attrs) {
            AuthDecision::Authenticated(token) => Ok(Some(token)),
            AuthDecision::Rejected(rejection) => Err(rejection.into()),
            AuthDecision::Indeterminate(_) => Ok(None),
        }
    }

    fn supports(&self, shape: TokenShape) -> bool {
        matches!(shape, TokenShape::UsernamePassword)
    }
}
