//! `AuthN` Provider SDK
//!
//! This crate provides the contracts around the REST credential authenticator:
//!
//! - [`AuthenticationProvider`] - what the web layer calls to authenticate a request
//! - [`AuthenticationService`] - the user-management service the authenticator delegates to
//! - [`Session`] / [`SessionFactory`] - the per-attempt unit of work
//! - [`AuthStatus`], [`Group`], [`Principal`], [`RequestAttributes`] - models
//! - [`AuthProviderError`], [`ServiceError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_provider_sdk::AuthenticationProvider;
//! use repo_security::AuthenticationRequest;
//!
//! let request = AuthenticationRequest::username_password("alice@example.org", "secret");
//! match provider.authenticate(&request, &attrs) {
//!     Ok(Some(identity)) => { /* authenticated */ }
//!     Ok(None) => { /* no decision, try the next mechanism */ }
//!     Err(e) => { /* bad credentials, answer 401 */ }
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod service_api;

// Re-export main types at crate root
pub use api::AuthenticationProvider;
pub use error::{AuthProviderError, ServiceError};
pub use models::{AuthStatus, Group, Principal, RequestAttributes};
pub use repo_security::{
    AuthenticationRequest, Credential, GrantedAuthority, IdentityToken, TokenShape,
};
pub use service_api::{AuthenticationService, Session, SessionFactory};
