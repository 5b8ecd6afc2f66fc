//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{errors::ErrorResponse, handlers::v1::*};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "License Mailer"),
    paths(
        send_email::handler,
        health::handler,
        sample_request::handler,
        templates::handler
    ),
    components(schemas(
        sample_request::SendEmailBody,
        sample_request::LicenseData,
        send_email::SendEmailResponse,
        health::HealthResponse,
        templates::TemplatesResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Email", description = "License email delivery"),
        (name = "System", description = "Service status and examples")
    )
)]
pub struct ApiDocs;
