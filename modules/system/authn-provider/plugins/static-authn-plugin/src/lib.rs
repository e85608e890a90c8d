#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthN` Plugin
//!
//! Configuration-backed `AuthenticationService` and `SessionFactory` for
//! development and testing.
//!
//! - **Explicit authentication**: password accounts, matched by email.
//! - **Implicit authentication**: requests from a trusted network are bound to
//!   the account assigned to that network.
//! - **Special groups**: every trusted network containing the caller's address
//!   contributes its groups.
//!
//! ## Configuration
//!
//! ```yaml
//! static_authn:
//!   accounts:
//!     - email: "alice@example.org"
//!       password: "correct"
//!   networks:
//!     - cidr: "10.0.0.0/8"
//!       groups: ["Campus"]
//!     - cidr: "192.0.2.10/32"
//!       email: "alice@example.org"
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use module::StaticAuthNPlugin;
