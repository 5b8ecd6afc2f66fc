//! Mailer errors

use thiserror::Error;

/// Message used when the transport fails without telling us why
pub const UNKNOWN_SEND_ERROR: &str = "Unknown error sending email";

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// An address could not be turned into a mailbox
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// The transport refused or failed to deliver the message
    #[error("{0}")]
    SendError(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl MailerError {
    /// Creates a [`MailerError::SendError`], falling back to a generic message
    /// when the transport error carries no text.
    pub fn send(message: impl Into<String>) -> Self {
        let message = message.into();

        if message.trim().is_empty() {
            MailerError::SendError(UNKNOWN_SEND_ERROR.to_string())
        } else {
            MailerError::SendError(message)
        }
    }
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<lettre::address::AddressError> for MailerError {
    fn from(err: lettre::address::AddressError) -> Self {
        MailerError::InvalidEmail(err.to_string())
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::send(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailerError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailerError::send(err.to_string())
    }
}

impl From<css_inline::InlineError> for MailerError {
    fn from(err: css_inline::InlineError) -> Self {
        MailerError::UnknownError(err.into())
    }
}
