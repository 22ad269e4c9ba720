//! Report delivery for rivalscan.
//!
//! The pipeline depends on the [`ReportMailer`] trait; [`SmtpMailer`] is the
//! production implementation over an implicit-TLS SMTP relay. One attempt per
//! send, no internal retry.

use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rivalscan_core::ReportDocument;

pub mod error;

pub use error::MailError;

/// Delivery seam for rendered reports.
pub trait ReportMailer {
    /// Deliver `document` as a PDF attachment. Returns the delivery timestamp.
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        document: &ReportDocument,
    ) -> impl std::future::Future<Output = Result<DateTime<Utc>, MailError>> + Send;
}

/// SMTP delivery over an implicit-TLS relay (port 465).
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer for `host`, authenticating as `sender_address`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Address`] if the sender address does not parse,
    /// or [`MailError::Smtp`] if the relay transport cannot be constructed.
    pub fn new(host: &str, sender_address: &str, password: &str) -> Result<Self, MailError> {
        let sender: Mailbox = sender_address.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(
                sender_address.to_string(),
                password.to_string(),
            ))
            .build();

        Ok(Self { transport, sender })
    }
}

impl ReportMailer for SmtpMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        document: &ReportDocument,
    ) -> Result<DateTime<Utc>, MailError> {
        let recipient: Mailbox = to.parse()?;
        let filename = document.filename();

        let attachment = Attachment::new(filename.clone())
            .body(document.bytes.clone(), ContentType::parse("application/pdf")?);

        let text_part = SinglePart::builder()
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string());

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(subject)
            .multipart(MultiPart::mixed().singlepart(text_part).singlepart(attachment))?;

        self.transport.send(message).await?;
        let delivered_at = Utc::now();

        tracing::info!(to, attachment = %filename, "report delivered");

        Ok(delivered_at)
    }
}
