pub mod client;
pub mod service;
pub mod session;

pub use service::Service;
pub use session::{InMemorySession, InMemorySessionFactory};
