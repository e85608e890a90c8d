//! Request Item Module
//!
//! Mails requests for restricted files to the approver of the item, and
//! mails the approver's decision back to the requester with the files
//! attached when access was granted.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::RequestItemConfig;
pub use domain::{AUTHOR_TEMPLATE, PrefixHandleService, RequestItemNotifier};
