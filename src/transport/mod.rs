//! SMTP dispatch - delivers finished emails with the resume attached

use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Delivery-layer failures. None of these invalidate an already-persisted
/// artifact; the caller reports them separately.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("attachment not found: {path}")]
    AttachmentMissing { path: PathBuf },

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("invalid attachment content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("SMTP failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// SMTP relay settings. The password arrives separately, from the
/// environment-sourced secrets read at startup.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub from_address: String,
}

/// Outbound mailer over STARTTLS with credentials.
pub struct Mailer {
    config: SmtpConfig,
    password: String,
}

impl Mailer {
    pub fn new(config: SmtpConfig, password: String) -> Self {
        Self { config, password }
    }

    /// Deliver one email with the file at `attachment_path` attached.
    ///
    /// The attachment is read before any connection is opened, so a missing
    /// file is reported without touching the network.
    pub fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment_path: &Path,
    ) -> Result<(), TransportError> {
        let attachment_bytes =
            std::fs::read(attachment_path).map_err(|_| TransportError::AttachmentMissing {
                path: attachment_path.to_path_buf(),
            })?;

        let filename = attachment_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("attachment")
            .to_string();
        let content_type = ContentType::parse(content_type_for(attachment_path))?;

        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body.to_string()))
                    .singlepart(Attachment::new(filename).body(attachment_bytes, content_type)),
            )?;

        let credentials = Credentials::new(
            self.config.from_address.clone(),
            self.password.clone(),
        );
        let transport = SmtpTransport::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(credentials)
            .build();

        transport.send(&message)?;
        info!("Email sent to {to}");
        Ok(())
    }
}

/// Content type guessed from the attachment extension.
fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> Mailer {
        Mailer::new(
            SmtpConfig {
                host: "smtp.gmail.com".to_string(),
                port: 587,
                from_address: "sender@example.com".to_string(),
            },
            "app-password".to_string(),
        )
    }

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(content_type_for(Path::new("resume.pdf")), "application/pdf");
        assert_eq!(content_type_for(Path::new("resume.TXT")), "text/plain");
        assert_eq!(
            content_type_for(Path::new("resume.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("noextension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_missing_attachment_detected_before_connecting() {
        let err = mailer()
            .send(
                "to@example.com",
                "Subject",
                "Body",
                Path::new("/no/such/resume.pdf"),
            )
            .unwrap_err();
        assert!(matches!(err, TransportError::AttachmentMissing { .. }));
    }

    #[test]
    fn test_invalid_recipient_address() {
        let dir = tempfile::tempdir().unwrap();
        let attachment = dir.path().join("resume.txt");
        std::fs::write(&attachment, "resume").unwrap();

        let err = mailer()
            .send("not an address", "Subject", "Body", &attachment)
            .unwrap_err();
        assert!(matches!(err, TransportError::Address(_)));
    }
}
