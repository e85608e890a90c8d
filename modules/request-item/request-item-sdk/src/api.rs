//! Collaborator traits consumed by the request item notifier.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{MailError, RequestItemError};
use crate::models::{BitstreamInfo, ItemRef, OutgoingEmail, RequestItemAuthor};

/// Determines who approves requests for an item.
#[async_trait]
pub trait AuthorExtractor: Send + Sync {
    /// # Errors
    ///
    /// `NoApprover` if nobody is responsible for the item, or `Storage` on
    /// lookup failures.
    async fn request_item_author(
        &self,
        item: &ItemRef,
    ) -> Result<RequestItemAuthor, RequestItemError>;
}

/// Turns handles into resolvable URLs.
pub trait HandleService: Send + Sync {
    fn canonical_form(&self, handle: &str) -> String;
}

/// Read access to item files.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Files of the item's `ORIGINAL` bundle(s), in bundle order.
    ///
    /// # Errors
    ///
    /// `Storage` on lookup failures.
    async fn original_bitstreams(
        &self,
        item: &ItemRef,
    ) -> Result<Vec<BitstreamInfo>, RequestItemError>;

    /// Whether anonymous users are denied read access to the file.
    ///
    /// # Errors
    ///
    /// `Storage` on lookup failures.
    async fn is_restricted(&self, bitstream: &BitstreamInfo) -> Result<bool, RequestItemError>;

    /// File content.
    ///
    /// # Errors
    ///
    /// `Storage` if the content cannot be read.
    async fn retrieve(&self, bitstream: &BitstreamInfo) -> Result<Bytes, RequestItemError>;
}

/// Delivers emails.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// # Errors
    ///
    /// `MailError` if the message was not accepted for delivery.
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}
