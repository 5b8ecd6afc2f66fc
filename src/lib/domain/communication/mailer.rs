//! Mailer module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::{MailerError, UNKNOWN_SEND_ERROR};
pub use message::{Message, MessageId, Recipients};

/// The outcome of a single send attempt: the provider-assigned message id,
/// or the reason the transport gave for refusing the message.
pub type DeliveryResult = Result<MessageId, MailerError>;

/// Outbound mail transport
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Whether the transport has everything it needs to attempt a delivery.
    ///
    /// No network access may happen when this returns `false`.
    fn is_configured(&self) -> bool;

    /// Checks that the remote endpoint is reachable and accepts our credentials.
    ///
    /// Never fails: the underlying cause is logged and `false` is returned.
    /// A successful check does not guarantee that a later send succeeds.
    async fn verify_connection(&self) -> bool;

    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The fully resolved [`Message`] to hand to the transport.
    ///
    /// # Returns
    /// A [`DeliveryResult`] with the provider's message id on success.
    async fn send_email(&self, message: &Message) -> DeliveryResult;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        fn is_configured(&self) -> bool;
        async fn verify_connection(&self) -> bool;
        async fn send_email(&self, message: &Message) -> DeliveryResult;
    }
}
