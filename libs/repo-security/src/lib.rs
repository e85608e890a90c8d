#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Security primitives shared by the repository REST layer.
//!
//! - [`IdentityToken`] - the authenticated identity handed to request handlers
//! - [`GrantedAuthority`] - a single granted authority (special group name)
//! - [`AuthenticationRequest`] / [`TokenShape`] - what the client presented

pub mod identity;
pub mod request;

pub use identity::{GrantedAuthority, IdentityToken, IdentityTokenBuilder};
pub use request::{AuthenticationRequest, Credential, TokenShape};
