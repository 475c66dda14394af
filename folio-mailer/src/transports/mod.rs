mod file;
pub mod smtp;

pub use file::FileTransport;
pub use smtp::{SmtpTransport, TlsConfig};

use crate::{Email, MailerError};
use lettre::Message;
use lettre::message::{MultiPart, SinglePart};

/// Converts an [`Email`] into a lettre message. Returns the message with its `Message-ID`.
pub(crate) fn build_message(email: Email) -> Result<(Message, String), MailerError> {
    let message_id = email.message_id;
    let mut message_builder = Message::builder()
        .from(email.from.parse()?)
        .subject(email.subject)
        .message_id(Some(message_id.clone()));

    for to in email.to {
        message_builder = message_builder.to(to.parse()?);
    }

    if let Some(reply_to) = email.reply_to {
        message_builder = message_builder.reply_to(reply_to.parse()?);
    }

    // Prefer multipart when both bodies are present
    let message = match (email.html_body, email.text_body) {
        (Some(html), Some(text)) => message_builder.multipart(
            MultiPart::alternative()
                .singlepart(SinglePart::plain(text))
                .singlepart(SinglePart::html(html)),
        )?,
        (Some(html), None) => message_builder.singlepart(SinglePart::html(html))?,
        (None, Some(text)) => message_builder.body(text)?,
        (None, None) => {
            return Err(MailerError::Builder("No email body provided".to_string()));
        }
    };

    Ok((message, message_id))
}
