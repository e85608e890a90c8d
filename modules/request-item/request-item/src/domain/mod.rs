//! Domain layer for the request item module.

pub mod handle;
pub mod notifier;


pub use handle::PrefixHandleService;
pub use notifier::{AUTHOR_TEMPLATE, RequestItemNotifier};
