//! SMTP email service implementation

use std::{convert::Infallible, fmt};

use async_trait::async_trait;
use clap::{ArgAction, Parser};
use lettre::{
    message::{
        header::{self, ContentType},
        Mailbox, Mailboxes,
    },
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use tracing::{debug, error, warn};

use crate::domain::communication::mailer::{
    DeliveryResult, Mailer, MailerError, Message, MessageId, Recipients,
};

/// SMTP configuration
#[derive(Clone, Default, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST", default_value = "")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// Connect with implicit TLS; only the exact value `true` enables it,
    /// anything else upgrades with STARTTLS when the server offers it
    #[clap(
        long = "smtp-secure",
        env = "SMTP_SECURE",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_secure
    )]
    pub secure: bool,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER", default_value = "")]
    pub username: String,

    /// The SMTP password
    #[clap(
        long = "smtp-pass",
        env = "SMTP_PASS",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// Verify the TLS certificate
    #[clap(
        long = "smtp-verify-tls",
        env = "SMTP_VERIFY_TLS",
        default_value = "true",
        action = ArgAction::Set
    )]
    pub verify_tls: bool,
}

fn parse_secure(value: &str) -> Result<bool, Infallible> {
    Ok(value == "true")
}

impl SMTPConfig {
    /// Whether host, user and password are all set
    pub fn is_complete(&self) -> bool {
        [&self.host, &self.username, &self.password]
            .iter()
            .all(|value| !value.trim().is_empty())
    }
}

impl fmt::Debug for SMTPConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SMTPConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Builds the async SMTP transport described by the configuration
    pub fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailerError> {
        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let tls_parameters = TlsParameters::builder(self.config.host.clone())
            .dangerous_accept_invalid_certs(!self.config.verify_tls)
            .build()?;

        let tls = if self.config.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.host)
                .port(self.config.port)
                .tls(tls)
                .credentials(creds)
                .build(),
        )
    }

    /// Converts a domain [`Message`] into a lettre message with a fresh `Message-ID`
    pub fn build_message(
        &self,
        message: &Message,
    ) -> Result<(lettre::Message, MessageId), MailerError> {
        let message_id = MessageId::generate(message.from.domain());

        let mut builder = lettre::Message::builder()
            .message_id(Some(message_id.to_string()))
            .from(message.from.as_ref().parse::<Mailbox>()?)
            .mailbox(header::To::from(mailboxes(&message.to)?))
            .subject(message.subject.clone());

        if let Some(cc) = &message.cc {
            builder = builder.mailbox(header::Cc::from(mailboxes(cc)?));
        }

        if let Some(bcc) = &message.bcc {
            builder = builder.mailbox(header::Bcc::from(mailboxes(bcc)?));
        }

        let html = css_inline::inline(&message.html_body)?;

        let email = builder.header(ContentType::TEXT_HTML).body(html)?;

        Ok((email, message_id))
    }
}

fn mailboxes(recipients: &Recipients) -> Result<Mailboxes, MailerError> {
    let mut mailboxes = Mailboxes::new();

    for address in recipients.iter() {
        mailboxes.push(address.as_ref().parse::<Mailbox>()?);
    }

    Ok(mailboxes)
}

#[async_trait]
impl Mailer for SMTPMailer {
    fn is_configured(&self) -> bool {
        self.config.is_complete()
    }

    async fn verify_connection(&self) -> bool {
        let transport = match self.transport() {
            Ok(transport) => transport,
            Err(err) => {
                error!("Error building SMTP transport: {err}");
                return false;
            }
        };

        match transport.test_connection().await {
            Ok(true) => true,
            Ok(false) => {
                warn!(host = %self.config.host, "SMTP server did not accept the connection");
                false
            }
            Err(err) => {
                error!(host = %self.config.host, "Error verifying SMTP connection: {err}");
                false
            }
        }
    }

    async fn send_email(&self, message: &Message) -> DeliveryResult {
        let (email, message_id) = self.build_message(message)?;

        debug!(%message_id, to = %message.to.joined(), "sending email");

        match self.transport()?.send(email).await {
            Ok(response) => {
                debug!(%message_id, code = %response.code(), "SMTP server accepted message");
                Ok(message_id)
            }
            Err(e) => {
                error!("Error sending email: {e}");
                Err(e.into())
            }
        }
    }
}
