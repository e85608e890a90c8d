//! Domain layer for the `AuthN` provider.

pub mod decision;
pub mod error;
pub mod local_client;
pub mod manager;
pub mod service;
mod session_guard;

#[cfg(test)]
mod service_test;

pub use decision::{AuthDecision, LOGIN_FAILED, Rejection};
pub use error::{AuthStage, DomainError};
pub use local_client::RestAuthenticationProvider;
pub use manager::ProviderManager;
pub use service::{AUDIT_TARGET, Service};
