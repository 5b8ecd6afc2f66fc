//! License email service module

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    communication::{
        mailer::{Mailer, Message, MessageId},
        templates::{TemplateError, TemplateRenderer},
    },
    licenses::{errors::DeliveryError, EmailRequest, PipelineResult},
};

/// License email service
#[async_trait]
pub trait LicenseEmailService: Clone + Send + Sync + 'static {
    /// Validates a raw request body, renders its template and sends it.
    ///
    /// # Arguments
    /// * `raw` - The untyped request body as received by the adapter.
    ///
    /// # Returns
    /// A [`PipelineResult`]; every failure is folded into it, nothing is
    /// returned as an error.
    async fn process(&self, raw: &Value) -> PipelineResult;

    /// Lists the templates requests may refer to.
    async fn templates(&self) -> Result<Vec<String>, TemplateError>;
}

#[cfg(test)]
mock! {
    pub LicenseEmailService {}

    impl Clone for LicenseEmailService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl LicenseEmailService for LicenseEmailService {
        async fn process(&self, raw: &Value) -> PipelineResult;
        async fn templates(&self) -> Result<Vec<String>, TemplateError>;
    }
}

/// License email service implementation
#[derive(Debug, Clone)]
pub struct LicenseEmailServiceImpl<M, T>
where
    M: Mailer,
    T: TemplateRenderer,
{
    mailer: Arc<M>,
    templates: Arc<T>,
}

impl<M, T> LicenseEmailServiceImpl<M, T>
where
    M: Mailer,
    T: TemplateRenderer,
{
    /// Creates a new license email service.
    pub fn new(mailer: Arc<M>, templates: Arc<T>) -> Self {
        Self { mailer, templates }
    }

    async fn deliver(&self, request: &EmailRequest) -> Result<MessageId, DeliveryError> {
        if !self.mailer.is_configured() {
            return Err(DeliveryError::ConfigIncomplete);
        }

        if !self.mailer.verify_connection().await {
            return Err(DeliveryError::ConnectionFailed);
        }

        let template_name = request.template_name();

        if !self.templates.exists(template_name).await {
            return Err(DeliveryError::TemplateNotFound(template_name.to_string()));
        }

        let html_body = self.templates.render(template_name, request.data()).await?;

        let message = Message {
            from: request.from().clone(),
            to: request.to().clone(),
            cc: request.cc().cloned(),
            bcc: request.bcc().cloned(),
            subject: request.subject().to_string(),
            html_body,
        };

        Ok(self.mailer.send_email(&message).await?)
    }
}

#[async_trait]
impl<M, T> LicenseEmailService for LicenseEmailServiceImpl<M, T>
where
    M: Mailer,
    T: TemplateRenderer,
{
    async fn process(&self, raw: &Value) -> PipelineResult {
        let outcome = match EmailRequest::try_from(raw) {
            Ok(request) => self.deliver(&request).await,
            Err(err) => Err(err.into()),
        };

        match outcome {
            Ok(message_id) => {
                info!(%message_id, "license email sent");

                PipelineResult::sent(message_id)
            }
            Err(DeliveryError::Validation(err)) => {
                warn!("rejected email request: {err}");

                DeliveryError::Validation(err).into()
            }
            Err(DeliveryError::UnknownError(err)) => {
                error!("internal error while sending email: {err:?}");

                DeliveryError::UnknownError(err).into()
            }
            Err(err) => {
                error!("could not send email: {err}");

                err.into()
            }
        }
    }

    async fn templates(&self) -> Result<Vec<String>, TemplateError> {
        self.templates.list().await
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use anyhow::anyhow;
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::communication::{
        mailer::{MailerError, MockMailer},
        templates::MockTemplateRenderer,
    };

    use super::*;

    fn valid_request() -> Value {
        json!({
            "templateName": "windows-license",
            "to": "a@x.com",
            "from": "b@x.com",
            "data": {
                "orderNumber": "1",
                "customerName": "C",
                "licenseKey": "K"
            }
        })
    }

    fn ready_mailer() -> MockMailer {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().returning(|| true);
        mailer.expect_verify_connection().returning(|| true);

        mailer
    }

    fn existing_template() -> MockTemplateRenderer {
        let mut templates = MockTemplateRenderer::new();

        templates
            .expect_exists()
            .withf(|name| name == "windows-license")
            .returning(|_| true);
        templates
            .expect_render()
            .returning(|_, data| Ok(format!("<p>{}</p>", data["licenseKey"])));

        templates
    }

    #[tokio::test]
    async fn test_process_success() -> TestResult {
        let mut mailer = ready_mailer();

        mailer
            .expect_send_email()
            .times(1)
            .withf(|message| {
                message.to.joined() == "a@x.com"
                    && message.from.as_ref() == "b@x.com"
                    && message.subject == "Windows License Delivery"
                    && message.html_body == "<p>\"K\"</p>"
                    && message.cc.is_none()
                    && message.bcc.is_none()
            })
            .returning(|_| Ok(MessageId::new("<provider-id@x.com>")));

        let service = LicenseEmailServiceImpl::new(Arc::new(mailer), Arc::new(existing_template()));

        let result = service.process(&valid_request()).await;

        assert_eq!(result, PipelineResult::sent(MessageId::new("<provider-id@x.com>")));
        assert_eq!(result.message_id.as_deref(), Some("<provider-id@x.com>"));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_request_touches_nothing() -> TestResult {
        let mut mailer = MockMailer::new();
        let mut templates = MockTemplateRenderer::new();

        mailer.expect_is_configured().times(0);
        mailer.expect_verify_connection().times(0);
        templates.expect_exists().times(0);

        let service = LicenseEmailServiceImpl::new(Arc::new(mailer), Arc::new(templates));

        let result = service
            .process(&json!({ "templateName": "windows-license" }))
            .await;

        assert!(!result.success);
        assert_eq!(result.status_code, 400);
        assert_eq!(
            result.error.as_deref(),
            Some("Required fields: templateName, to, data, from")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_incomplete_configuration() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_is_configured().returning(|| false);
        mailer.expect_verify_connection().times(0);

        let service = LicenseEmailServiceImpl::new(
            Arc::new(mailer),
            Arc::new(MockTemplateRenderer::new()),
        );

        let result = service.process(&valid_request()).await;

        assert_eq!(result.status_code, 500);
        assert!(result
            .error
            .as_deref()
            .is_some_and(|error| error.contains("SMTP configuration")));

        Ok(())
    }

    #[tokio::test]
    async fn test_connection_failure() -> TestResult {
        let mut mailer = MockMailer::new();
        let mut templates = MockTemplateRenderer::new();

        mailer.expect_is_configured().returning(|| true);
        mailer.expect_verify_connection().times(1).returning(|| false);
        mailer.expect_send_email().times(0);
        templates.expect_exists().times(0);

        let service = LicenseEmailServiceImpl::new(Arc::new(mailer), Arc::new(templates));

        let result = service.process(&valid_request()).await;

        assert_eq!(result.status_code, 500);
        assert_eq!(result.error.as_deref(), Some("Could not connect to SMTP server"));

        Ok(())
    }

    #[tokio::test]
    async fn test_template_not_found() -> TestResult {
        let mut mailer = ready_mailer();
        let mut templates = MockTemplateRenderer::new();

        mailer.expect_send_email().times(0);
        templates.expect_exists().returning(|_| false);
        templates.expect_render().times(0);

        let service = LicenseEmailServiceImpl::new(Arc::new(mailer), Arc::new(templates));

        let mut raw = valid_request();
        raw["templateName"] = json!("office-license");

        let result = service.process(&raw).await;

        assert_eq!(result.status_code, 500);
        assert_eq!(
            result.error.as_deref(),
            Some("Template 'office-license' not found")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_render_failure() -> TestResult {
        let mut mailer = ready_mailer();
        let mut templates = MockTemplateRenderer::new();

        mailer.expect_send_email().times(0);
        templates.expect_exists().returning(|_| true);
        templates.expect_render().returning(|name, _| {
            Err(TemplateError::Render {
                name: name.to_string(),
                message: "unclosed block".to_string(),
            })
        });

        let service = LicenseEmailServiceImpl::new(Arc::new(mailer), Arc::new(templates));

        let result = service.process(&valid_request()).await;

        assert_eq!(result.status_code, 500);
        assert_eq!(
            result.error.as_deref(),
            Some("Error rendering template 'windows-license': unclosed block")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_send_failure() -> TestResult {
        let mut mailer = ready_mailer();

        mailer
            .expect_send_email()
            .returning(|_| Err(MailerError::send("SMTP Error")));

        let service = LicenseEmailServiceImpl::new(Arc::new(mailer), Arc::new(existing_template()));

        let result = service.process(&valid_request()).await;

        assert_eq!(result, PipelineResult::failed(500, "SMTP Error"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unexpected_failure_is_not_leaked() -> TestResult {
        let mut mailer = ready_mailer();

        mailer.expect_send_email().returning(|_| {
            Err(MailerError::UnknownError(anyhow!(
                "tls handshake failed at /etc/ssl/private/key.pem"
            )))
        });

        let service = LicenseEmailServiceImpl::new(Arc::new(mailer), Arc::new(existing_template()));

        let result = service.process(&valid_request()).await;

        assert_eq!(result, PipelineResult::failed(500, "Internal server error"));

        Ok(())
    }

    #[tokio::test]
    async fn test_templates_are_listed() -> TestResult {
        let mut templates = MockTemplateRenderer::new();

        templates
            .expect_list()
            .returning(|| Ok(vec!["office-license".to_string(), "windows-license".to_string()]));

        let service = LicenseEmailServiceImpl::new(Arc::new(MockMailer::new()), Arc::new(templates));

        assert_eq!(
            service.templates().await?,
            vec!["office-license".to_string(), "windows-license".to_string()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_template_listing_failure() {
        let mut templates = MockTemplateRenderer::new();

        templates
            .expect_list()
            .returning(|| Err(TemplateError::List(io::Error::from(io::ErrorKind::NotFound))));

        let service = LicenseEmailServiceImpl::new(Arc::new(MockMailer::new()), Arc::new(templates));

        assert!(matches!(
            service.templates().await,
            Err(TemplateError::List(_))
        ));
    }
}
