//! Request Item SDK
//!
//! Contracts around the notifier that mails requests for restricted files:
//!
//! - [`RequestItem`], [`RequestItemAuthor`], [`ItemRef`], [`BitstreamInfo`] - request models
//! - [`OutgoingEmail`], [`EmailContent`], [`Attachment`] - what gets sent
//! - [`AuthorExtractor`], [`HandleService`], [`ContentStore`], [`MailTransport`] - collaborators
//! - [`RequestItemError`], [`MailError`] - error types

pub mod api;
pub mod error;
pub mod models;

pub use api::{AuthorExtractor, ContentStore, HandleService, MailTransport};
pub use error::{MailError, RequestItemError};
pub use models::{
    Attachment, BitstreamInfo, EmailContent, ItemRef, OutgoingEmail, RequestItem,
    RequestItemAuthor,
};
