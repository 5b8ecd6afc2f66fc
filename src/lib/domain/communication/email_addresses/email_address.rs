//! Email Address

use lazy_static::lazy_static;
use lettre::message::Mailbox;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s<>,]+@[^@\s<>,]+\.[^@\s<>,]+$").unwrap();
    static ref NAMED_EMAIL_REGEX: Regex =
        Regex::new(r"^(?P<name>[^<>]*?)\s*<(?P<address>[^<>]+)>$").unwrap();
}

use std::fmt;

use thiserror::Error;

use EmailAddressError::*;

/// An error that can occur when creating an email address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailAddressError {
    /// The email address is empty
    #[error("email is empty")]
    EmptyEmailAddress,

    /// The email address is invalid
    #[error("email is invalid")]
    InvalidEmailAddress,
}

/// An email address, either bare (`user@example.com`) or with a display name
/// (`Example Shop <user@example.com>`).
///
/// Anything accepted here is also accepted as a mailbox by the SMTP transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmptyEmailAddress);
        }

        if !EMAIL_REGEX.is_match(address_part(trimmed)) || trimmed.parse::<Mailbox>().is_err() {
            return Err(InvalidEmailAddress);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create an email address without validating it
    #[cfg(test)]
    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// The bare address, without any display name
    pub fn address(&self) -> &str {
        address_part(&self.0)
    }

    /// The domain part of the address
    pub fn domain(&self) -> &str {
        self.address()
            .rsplit_once('@')
            .map_or("localhost", |(_, domain)| domain)
    }
}

fn address_part(raw: &str) -> &str {
    NAMED_EMAIL_REGEX
        .captures(raw)
        .and_then(|captures| captures.name("address"))
        .map_or(raw, |address| address.as_str().trim())
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}
