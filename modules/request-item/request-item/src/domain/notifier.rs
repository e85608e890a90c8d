//! Emails for requests to access restricted files.

use std::sync::Arc;

use request_item_sdk::{
    Attachment, AuthorExtractor, BitstreamInfo, ContentStore, EmailContent, HandleService,
    MailTransport, OutgoingEmail, RequestItem, RequestItemError,
};
use tracing::{info, warn};

use super::handle::PrefixHandleService;
use crate::config::RequestItemConfig;

/// Template of the email asking the approver to decide on a request.
pub const AUTHOR_TEMPLATE: &str = "request_item.author";

/// Sends item requests to approvers and their responses back to requesters.
pub struct RequestItemNotifier {
    authors: Arc<dyn AuthorExtractor>,
    handles: Arc<dyn HandleService>,
    content: Arc<dyn ContentStore>,
    mail: Arc<dyn MailTransport>,
    config: RequestItemConfig,
}

impl RequestItemNotifier {
    #[must_use]
    pub fn new(
        authors: Arc<dyn AuthorExtractor>,
        handles: Arc<dyn HandleService>,
        content: Arc<dyn ContentStore>,
        mail: Arc<dyn MailTransport>,
        config: RequestItemConfig,
    ) -> Self {
        Self {
            authors,
            handles,
            content,
            mail,
            config,
        }
    }

    /// Notifier that forms handle URLs from `config.canonical_handle_prefix`.
    #[must_use]
    pub fn with_prefix_handles(
        authors: Arc<dyn AuthorExtractor>,
        content: Arc<dyn ContentStore>,
        mail: Arc<dyn MailTransport>,
        config: RequestItemConfig,
    ) -> Self {
        let handles = Arc::new(PrefixHandleService::new(
            config.canonical_handle_prefix.clone(),
        ));
        Self::new(authors, handles, content, mail, config)
    }

    /// Mail the request to the item's approver.
    ///
    /// Template arguments, in order: requester name, requester email,
    /// requested file (or the all-files label), canonical handle URL, item
    /// title, requester message, response link, approver name, approver
    /// email, site name, help desk address.
    ///
    /// # Errors
    ///
    /// - approver lookup errors are passed through
    /// - `MissingBitstream` for a single-file request without a file
    /// - `RequestNotSent` if the transport refuses the message
    pub async fn send_request(
        &self,
        ri: &RequestItem,
        response_link: &str,
    ) -> Result<(), RequestItemError> {
        let author = self.authors.request_item_author(&ri.item).await?;

        let requested = if ri.all_files {
            self.config.all_files_label.clone()
        } else {
            requested_bitstream(ri)?.name.clone()
        };

        let arguments = vec![
            ri.requester_name.clone(),
            ri.requester_email.clone(),
            requested,
            self.handles.canonical_form(&ri.item.handle),
            ri.item.title.clone(),
            ri.message.clone(),
            response_link.to_owned(),
            author.full_name,
            author.email.clone(),
            self.config.site_name.clone(),
            self.config.helpdesk_email.clone(),
        ];
        let email = OutgoingEmail::new(EmailContent::Template {
            name: self.config.template_name(AUTHOR_TEMPLATE),
            arguments,
        })
        .to(author.email)
        .reply_to(ri.requester_email.as_str());

        if let Err(e) = self.mail.send(email).await {
            warn!(
                action = "error_mailing_requestItem",
                token = %ri.token,
                error = %e,
                "Failed to mail item request"
            );
            return Err(RequestItemError::RequestNotSent(e.to_string()));
        }

        info!(
            action = "sent_email_requestItem",
            submitter = %ri.requester_email,
            bitstream_id = %ri.bitstream_id_label(),
            "Item request mailed to approver"
        );
        Ok(())
    }

    /// Mail the approver's decision to the requester, attaching the files
    /// when the request was accepted.
    ///
    /// All-files requests attach every restricted, non-internal file of the
    /// item's original bundle.
    ///
    /// # Errors
    ///
    /// `ReplyNotSent` if attachments cannot be gathered or the transport
    /// refuses the message.
    pub async fn send_response(
        &self,
        ri: &RequestItem,
        subject: &str,
        message: &str,
    ) -> Result<(), RequestItemError> {
        let mut email = OutgoingEmail::new(EmailContent::Body {
            subject: subject.to_owned(),
            body: message.to_owned(),
        })
        .to(ri.requester_email.as_str());

        if ri.accepted
            && let Err(e) = self.attach_files(ri, &mut email).await
        {
            warn!(
                action = "error_mailing_requestItem",
                token = %ri.token,
                error = %e,
                "Failed to gather attachments"
            );
            return Err(RequestItemError::ReplyNotSent(e.to_string()));
        }

        let attachments = email.attachments.len();
        if let Err(e) = self.mail.send(email).await {
            warn!(
                action = "error_mailing_requestItem",
                token = %ri.token,
                error = %e,
                "Failed to mail item response"
            );
            return Err(RequestItemError::ReplyNotSent(e.to_string()));
        }

        info!(
            action = "sent_attach_requestItem",
            token = %ri.token,
            attachments,
            "Item response mailed to requester"
        );
        Ok(())
    }

    async fn attach_files(
        &self,
        ri: &RequestItem,
        email: &mut OutgoingEmail,
    ) -> Result<(), RequestItemError> {
        if !ri.all_files {
            email.attach(self.attachment(requested_bitstream(ri)?).await?);
            return Ok(());
        }

        for bitstream in self.content.original_bitstreams(&ri.item).await? {
            if bitstream.internal_format || !self.content.is_restricted(&bitstream).await? {
                continue;
            }
            email.attach(self.attachment(&bitstream).await?);
        }
        Ok(())
    }

    async fn attachment(&self, bitstream: &BitstreamInfo) -> Result<Attachment, RequestItemError> {
        let content = self.content.retrieve(bitstream).await?;
        Ok(Attachment {
            name: bitstream.name.clone(),
            mime_type: bitstream.mime_type.clone(),
            content,
        })
    }
}

fn requested_bitstream(ri: &RequestItem) -> Result<&BitstreamInfo, RequestItemError> {
    ri.bitstream
        .as_ref()
        .ok_or_else(|| RequestItemError::MissingBitstream(ri.token.clone()))
}
