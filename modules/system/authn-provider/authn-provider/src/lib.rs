//! `AuthN` Provider Module
//!
//! Authenticates REST API credentials against an injected
//! [`AuthenticationService`](authn_provider_sdk::AuthenticationService) and
//! maps the outcome into an [`IdentityToken`](repo_security::IdentityToken).
//!
//! Implicit (ambient) authentication is attempted first; the submitted
//! name/secret pair is only checked when it does not apply. Rejections stop
//! the provider chain, internal faults let it fall through.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod http;

pub use config::AuthnProviderConfig;
pub use domain::{AuthDecision, ProviderManager, RestAuthenticationProvider, Service};
pub use http::{BasicAuthState, basic_auth_middleware};
