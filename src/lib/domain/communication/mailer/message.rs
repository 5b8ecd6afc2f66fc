//! Email message

use std::fmt;

use uuid::Uuid;

use crate::domain::communication::email_addresses::EmailAddress;

/// One or more recipients, in the order they were given
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipients(Vec<EmailAddress>);

impl Recipients {
    /// Creates a recipient list, or `None` when there are no addresses
    pub fn new(addresses: Vec<EmailAddress>) -> Option<Self> {
        if addresses.is_empty() {
            None
        } else {
            Some(Self(addresses))
        }
    }

    /// The addresses as a single comma-delimited header value
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(", ")
    }

    /// Iterates over the addresses in order
    pub fn iter(&self) -> impl Iterator<Item = &EmailAddress> {
        self.0.iter()
    }
}

impl From<EmailAddress> for Recipients {
    fn from(address: EmailAddress) -> Self {
        Self(vec![address])
    }
}

/// Email message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The sender of the email
    pub from: EmailAddress,

    /// The recipients of the email
    pub to: Recipients,

    /// Carbon-copy recipients, omitted from the message when `None`
    pub cc: Option<Recipients>,

    /// Blind carbon-copy recipients, omitted from the message when `None`
    pub bcc: Option<Recipients>,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html_body: String,
}

/// Identifier assigned to a message once it has been handed to the transport
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps an identifier returned by a provider
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh `Message-ID` for a message sent from `domain`
    pub fn generate(domain: &str) -> Self {
        Self(format!("<{}@{}>", Uuid::now_v7(), domain))
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MessageId> for String {
    fn from(id: MessageId) -> Self {
        id.0
    }
}
