//! Public API trait for authentication providers.
//!
//! The web layer holds an ordered list of providers and asks each one that
//! supports the presented token shape for a decision.

use repo_security::{AuthenticationRequest, IdentityToken, TokenShape};

use crate::error::AuthProviderError;
use crate::models::RequestAttributes;

/// Public API trait for authentication providers.
///
/// A provider has three possible answers, and callers must treat them
/// differently:
///
/// - `Ok(Some(identity))`: authenticated, stop here
/// - `Err(AuthProviderError::BadCredentials(_))`: rejected, stop here and answer
///   with a generic authentication failure
/// - `Ok(None)`: no decision (internal fault already logged, or unsupported
///   request), the caller may try other mechanisms
pub trait AuthenticationProvider: Send + Sync {
    /// Authenticate a request.
    ///
    /// # Errors
    ///
    /// - `BadCredentials` if the presented credentials do not identify a usable principal
    fn authenticate(
        &self,
        request: &AuthenticationRequest,
        attrs: &RequestAttributes,
    ) -> Result<Option<IdentityToken>, AuthProviderError>;

    /// Whether this provider is willing to decide on requests of the given shape.
    fn supports(&self, shape: TokenShape) -> bool;
}
