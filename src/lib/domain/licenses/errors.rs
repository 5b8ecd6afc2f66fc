//! Error types for license email delivery

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::{mailer::MailerError, templates::TemplateError};

/// Reasons an inbound request body is rejected before any work is attempted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The body is absent or not a JSON object
    #[error("Request must be an object")]
    InvalidShape,

    /// One of the required top-level fields is absent or falsy
    #[error("Required fields: templateName, to, data, from")]
    MissingFields,

    /// `data` is present but not an object
    #[error("Data must be an object")]
    InvalidDataShape,

    /// `data` lacks one of the template variables the license templates need
    #[error("Required data fields: orderNumber, customerName, licenseKey")]
    MissingDataFields,

    /// A field has a type we cannot use
    #[error("Field '{field}' has an invalid type")]
    InvalidField {
        /// The offending field
        field: &'static str,
    },

    /// An address field holds something that is not an email address
    #[error("Field '{field}' contains an invalid email address: {address}")]
    InvalidAddress {
        /// The offending field
        field: &'static str,

        /// The rejected address
        address: String,
    },
}

/// Errors that can end a delivery attempt
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request body was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// SMTP host, user or password is missing
    #[error("Incomplete SMTP configuration. Check environment variables.")]
    ConfigIncomplete,

    /// The SMTP endpoint could not be reached
    #[error("Could not connect to SMTP server")]
    ConnectionFailed,

    /// No template with the requested name
    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    /// The template exists but rendering failed
    #[error("{0}")]
    TemplateRenderError(String),

    /// The transport failed to deliver the message
    #[error("{0}")]
    DeliveryFailed(String),

    /// Anything else; the cause is logged and never shown to callers
    #[error("Internal server error")]
    UnknownError(#[from] anyhow::Error),
}

impl DeliveryError {
    /// The HTTP-style status code callers should see for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DeliveryError::Validation(_) => 400,
            _ => 500,
        }
    }
}

impl From<TemplateError> for DeliveryError {
    fn from(err: TemplateError) -> Self {
        debug!("TemplateError -> DeliveryError");

        match err {
            TemplateError::NotFound(name) => DeliveryError::TemplateNotFound(name),
            TemplateError::Render { .. } => DeliveryError::TemplateRenderError(err.to_string()),
            TemplateError::List(e) => DeliveryError::UnknownError(e.into()),
        }
    }
}

impl From<MailerError> for DeliveryError {
    fn from(err: MailerError) -> Self {
        debug!("MailerError -> DeliveryError");

        match err {
            MailerError::InvalidEmail(_) | MailerError::SendError(_) => {
                DeliveryError::DeliveryFailed(err.to_string())
            }
            MailerError::UnknownError(e) => DeliveryError::UnknownError(e),
        }
    }
}
