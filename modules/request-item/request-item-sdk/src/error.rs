//! Error types for the request item module.

use thiserror::Error;

/// Errors surfaced by the notifier and its collaborators.
#[derive(Debug, Error)]
pub enum RequestItemError {
    /// The request email to the approver could not be sent.
    #[error("Request not sent: {0}")]
    RequestNotSent(String),

    /// The response email to the requester could not be sent.
    #[error("Reply not sent: {0}")]
    ReplyNotSent(String),

    /// No approver could be determined for the item.
    #[error("no approver for item {0}")]
    NoApprover(String),

    /// A single-file request does not name its file.
    #[error("request {0} does not name a bitstream")]
    MissingBitstream(String),

    /// Content or metadata lookup failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Failure reported by a [`MailTransport`](crate::MailTransport).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct MailError(pub String);
