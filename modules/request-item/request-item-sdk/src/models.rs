//! Models for item requests and the emails they produce.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The item a request refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: Uuid,
    /// Persistent identifier, e.g. `123456789/42`.
    pub handle: String,
    pub title: String,
}

/// A stored file of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitstreamInfo {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    /// Internal formats (licenses, thumbnails) are never sent to requesters.
    #[serde(default)]
    pub internal_format: bool,
}

/// A request for access to restricted files of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    /// Token identifying the request in approval links.
    pub token: String,
    pub item: ItemRef,
    /// The requested file; absent for all-files requests.
    pub bitstream: Option<BitstreamInfo>,
    pub all_files: bool,
    pub requester_name: String,
    pub requester_email: String,
    pub message: String,
    /// Set once the approver granted the request.
    #[serde(default)]
    pub accepted: bool,
}

impl RequestItem {
    /// Id of the requested file, or `"null"` for all-files requests.
    #[must_use]
    pub fn bitstream_id_label(&self) -> String {
        self.bitstream
            .as_ref()
            .map_or_else(|| "null".to_owned(), |b| b.id.to_string())
    }
}

/// The person who decides on a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItemAuthor {
    pub full_name: String,
    pub email: String,
}

/// A file attached to an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    pub content: Bytes,
}

/// What the email says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailContent {
    /// A named template filled with positional arguments `{0}`, `{1}`, ...
    Template { name: String, arguments: Vec<String> },
    /// Literal subject and body.
    Body { subject: String, body: String },
}

/// An email ready to hand to a [`MailTransport`](crate::MailTransport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub recipients: Vec<String>,
    pub reply_to: Option<String>,
    pub content: EmailContent,
    pub attachments: Vec<Attachment>,
}

impl OutgoingEmail {
    #[must_use]
    pub fn new(content: EmailContent) -> Self {
        Self {
            recipients: Vec::new(),
            reply_to: None,
            content,
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    #[must_use]
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }
}
