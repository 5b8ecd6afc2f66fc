//! Serverless function adapter
//!
//! Accepts a function-URL style event, feeds its body through the delivery
//! pipeline and wraps the [`PipelineResult`] in a function-URL response.

use std::{any::Any, collections::HashMap, panic::AssertUnwindSafe};

use base64::{engine::general_purpose::STANDARD, Engine};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::licenses::{LicenseEmailService, PipelineResult};

/// Request context attached to every invocation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// The platform-assigned request id
    #[serde(default)]
    pub request_id: String,
}

/// An incoming function-URL event
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionUrlEvent {
    /// The raw request path
    #[serde(default)]
    pub raw_path: String,

    /// Request headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// The request body, if any
    #[serde(default)]
    pub body: Option<String>,

    /// Whether `body` is base64 encoded
    #[serde(default)]
    pub is_base64_encoded: bool,

    /// Invocation context
    #[serde(default)]
    pub request_context: RequestContext,
}

/// The response handed back to the function runtime
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionUrlResponse {
    /// HTTP status code
    pub status_code: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// The serialized [`PipelineResult`]
    pub body: String,

    /// Always `false`; bodies are plain JSON
    pub is_base64_encoded: bool,
}

/// Reasons an event body never reaches the pipeline
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// The event carried no body
    #[error("Request body required")]
    MissingBody,

    /// The body was not decodable JSON
    #[error("Invalid JSON in request body")]
    InvalidJson,
}

impl FunctionUrlEvent {
    /// Decodes the event body into JSON.
    pub fn json_body(&self) -> Result<Value, EventError> {
        let body = self
            .body
            .as_deref()
            .filter(|body| !body.is_empty())
            .ok_or(EventError::MissingBody)?;

        let bytes = if self.is_base64_encoded {
            STANDARD.decode(body).map_err(|_| EventError::InvalidJson)?
        } else {
            body.as_bytes().to_vec()
        };

        serde_json::from_slice(&bytes).map_err(|_| EventError::InvalidJson)
    }
}

/// Handles a single function invocation.
pub async fn handle_event<S: LicenseEmailService>(
    service: &S,
    event: FunctionUrlEvent,
) -> FunctionUrlResponse {
    let request_id = event.request_context.request_id.as_str();

    let result = match event.json_body() {
        Ok(body) => AssertUnwindSafe(async { service.process(&body).await })
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                error!(request_id, "pipeline panicked: {}", panic_message(&*panic));

                PipelineResult::failed(500, "Internal server error")
            }),
        Err(e) => {
            warn!(request_id, "rejected event: {e}");

            PipelineResult::failed(400, e.to_string())
        }
    };

    info!(request_id, status = result.status_code, "event handled");

    respond(&result)
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    }
}

fn respond(result: &PipelineResult) -> FunctionUrlResponse {
    let headers = HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ]);

    let (status_code, body) = match serde_json::to_string(result) {
        Ok(body) => (result.status_code, body),
        Err(_) => (
            500,
            r#"{"success":false,"error":"Internal server error"}"#.to_string(),
        ),
    };

    FunctionUrlResponse {
        status_code,
        headers,
        body,
        is_base64_encoded: false,
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, sync::Arc};

    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::{
            communication::mailer::MessageId,
            licenses::{tests::MockLicenseEmailService, LicenseEmailServiceImpl, PipelineResult},
        },
        infrastructure::{
            email::smtp::{SMTPConfig, SMTPMailer},
            templates::files::FileTemplates,
        },
    };

    use super::*;

    fn event(body: Option<&str>) -> FunctionUrlEvent {
        FunctionUrlEvent {
            raw_path: "/".to_string(),
            body: body.map(ToString::to_string),
            request_context: RequestContext {
                request_id: "test-request-id".to_string(),
            },
            ..Default::default()
        }
    }

    fn license_request() -> Value {
        json!({
            "templateName": "windows-license",
            "to": "test@example.com",
            "from": "noreply@test.com",
            "data": {
                "orderNumber": "1234567890",
                "customerName": "Test User",
                "licenseKey": "TEST-KEY-12345"
            }
        })
    }

    fn parse(response: &FunctionUrlResponse) -> Result<PipelineResult, serde_json::Error> {
        serde_json::from_str(&response.body)
    }

    #[tokio::test]
    async fn test_missing_body() -> TestResult {
        let mut service = MockLicenseEmailService::new();
        service.expect_process().times(0);

        let response = handle_event(&service, event(None)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(parse(&response)?.error.as_deref(), Some("Request body required"));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_body() -> TestResult {
        let mut service = MockLicenseEmailService::new();
        service.expect_process().times(0);

        let response = handle_event(&service, event(Some(""))).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(parse(&response)?.error.as_deref(), Some("Request body required"));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_json() -> TestResult {
        let mut service = MockLicenseEmailService::new();
        service.expect_process().times(0);

        let response = handle_event(&service, event(Some("invalid json"))).await;

        assert_eq!(response.status_code, 400);

        let body = parse(&response)?;

        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Invalid JSON in request body"));

        Ok(())
    }

    #[tokio::test]
    async fn test_success_passes_result_through() -> TestResult {
        let mut service = MockLicenseEmailService::new();

        service
            .expect_process()
            .times(1)
            .withf(|raw| raw["data"]["licenseKey"] == "TEST-KEY-12345")
            .returning(|_| PipelineResult::sent(MessageId::new("test-message-id")));

        let body = license_request().to_string();
        let response = handle_event(&service, event(Some(&body))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            response.headers.get("Access-Control-Allow-Origin").map(String::as_str),
            Some("*")
        );
        assert!(!response.is_base64_encoded);

        let result = parse(&response)?;

        assert!(result.success);
        assert_eq!(result.message_id.as_deref(), Some("test-message-id"));
        assert_eq!(result.message.as_deref(), Some("Email sent successfully"));

        Ok(())
    }

    #[tokio::test]
    async fn test_panic_is_contained() -> TestResult {
        let mut service = MockLicenseEmailService::new();

        service
            .expect_process()
            .returning(|_| panic!("smtp password is hunter2"));

        let body = license_request().to_string();
        let response = handle_event(&service, event(Some(&body))).await;

        assert_eq!(response.status_code, 500);
        assert!(!response.body.contains("hunter2"));

        let result = parse(&response)?;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Internal server error"));

        Ok(())
    }

    #[tokio::test]
    async fn test_base64_body() -> TestResult {
        let mut service = MockLicenseEmailService::new();

        service
            .expect_process()
            .times(1)
            .withf(|raw| raw["templateName"] == "windows-license")
            .returning(|_| PipelineResult::sent(MessageId::new("test-message-id")));

        let mut event = event(Some(&STANDARD.encode(license_request().to_string())));
        event.is_base64_encoded = true;

        let response = handle_event(&service, event).await;

        assert_eq!(response.status_code, 200);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_base64_body() -> TestResult {
        let mut service = MockLicenseEmailService::new();
        service.expect_process().times(0);

        let mut event = event(Some("%%% not base64 %%%"));
        event.is_base64_encoded = true;

        let response = handle_event(&service, event).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            parse(&response)?.error.as_deref(),
            Some("Invalid JSON in request body")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_deserializes_function_url_event() -> TestResult {
        let event: FunctionUrlEvent = serde_json::from_value(json!({
            "version": "2.0",
            "rawPath": "/",
            "headers": { "content-type": "application/json" },
            "requestContext": { "requestId": "abc", "stage": "test" },
            "body": "{}",
            "isBase64Encoded": false
        }))?;

        assert_eq!(event.request_context.request_id, "abc");
        assert_eq!(event.json_body(), Ok(json!({})));

        Ok(())
    }

    fn real_service() -> LicenseEmailServiceImpl<SMTPMailer, FileTemplates> {
        let templates = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates");

        LicenseEmailServiceImpl::new(
            Arc::new(SMTPMailer::new(SMTPConfig::default())),
            Arc::new(FileTemplates::new(templates)),
        )
    }

    #[tokio::test]
    async fn test_missing_required_fields() -> TestResult {
        let body = json!({ "templateName": "windows-license" }).to_string();
        let response = handle_event(&real_service(), event(Some(&body))).await;

        assert_eq!(response.status_code, 400);
        assert!(parse(&response)?
            .error
            .is_some_and(|e| e.contains("Required fields")));

        Ok(())
    }

    #[tokio::test]
    async fn test_incomplete_template_data() -> TestResult {
        let body = json!({
            "templateName": "windows-license",
            "to": "test@example.com",
            "from": "noreply@test.com",
            "data": { "orderNumber": "123" }
        })
        .to_string();

        let response = handle_event(&real_service(), event(Some(&body))).await;

        assert_eq!(response.status_code, 400);
        assert!(parse(&response)?
            .error
            .is_some_and(|e| e.contains("Required data fields")));

        Ok(())
    }

    #[tokio::test]
    async fn test_incomplete_smtp_configuration() -> TestResult {
        let body = license_request().to_string();
        let response = handle_event(&real_service(), event(Some(&body))).await;

        assert_eq!(response.status_code, 500);

        let result = parse(&response)?;

        assert!(!result.success);
        assert!(result
            .error
            .is_some_and(|e| e.contains("SMTP configuration")));

        Ok(())
    }
}
