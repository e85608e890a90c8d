//! Ordered chain of authentication providers.

use std::sync::Arc;

use authn_provider_sdk::{
    AuthProviderError, AuthenticationProvider, AuthenticationRequest, IdentityToken,
    RequestAttributes,
};
use tracing::debug;

/// Asks each provider that supports the request shape, in order.
///
/// A rejection stops the chain; "no decision" moves on to the next provider.
#[derive(Clone, Default)]
pub struct ProviderManager {
    providers: Vec<Arc<dyn AuthenticationProvider>>,
}

impl ProviderManager {
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn AuthenticationProvider>>) -> Self {
        Self { providers }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn AuthenticationProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Run the chain.
    ///
    /// # Errors
    ///
    /// - `BadCredentials` as soon as a provider rejects the request
    /// - `NoProviderDecided` if every supporting provider abstained
    pub fn authenticate(
        &self,
        request: &AuthenticationRequest,
        attrs: &RequestAttributes,
    ) -> Result<IdentityToken, AuthProviderError> {
        let shape = request.shape();

        for (index, provider) in self.providers.iter().enumerate() {
            if !provider.supports(shape) {
                continue;
            }
            if let Some(token) = provider.authenticate(request, attrs)? {
                return Ok(token);
            }
            debug!(provider = index, "Provider reached no decision, trying next");
        }

        Err(AuthProviderError::NoProviderDecided)
    }
}
