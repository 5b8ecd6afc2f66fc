//! Sample request handler

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Template variables for the license templates
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicenseData {
    /// The shop's order number
    #[schema(example = "1234567890")]
    pub order_number: String,

    /// The customer's display name
    #[schema(example = "Test User")]
    pub customer_name: String,

    /// The license key being delivered
    #[schema(example = "XXXXX-XXXXX-XXXXX-XXXXX-XXXXX")]
    pub license_key: String,

    /// The product name, shown when present
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Windows 11 Pro")]
    pub product_name: Option<String>,
}

/// Send email request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailBody {
    /// The template to render
    #[schema(example = "windows-license")]
    pub template_name: String,

    /// A recipient address, or a list of them
    #[schema(value_type = Object, example = json!("customer@example.com"))]
    pub to: serde_json::Value,

    /// Carbon-copy address or list of addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub cc: Option<serde_json::Value>,

    /// Blind carbon-copy address or list of addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub bcc: Option<serde_json::Value>,

    /// The sender address
    #[schema(example = "Shop <noreply@shop.example.com>")]
    pub from: String,

    /// The subject; defaults to "Windows License Delivery"
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Your Windows license")]
    pub subject: Option<String>,

    /// Template variables
    pub data: LicenseData,
}

impl SendEmailBody {
    /// A complete, valid request body
    pub fn sample() -> Self {
        Self {
            template_name: "windows-license".to_string(),
            to: serde_json::Value::String("customer@example.com".to_string()),
            cc: None,
            bcc: None,
            from: "Shop <noreply@shop.example.com>".to_string(),
            subject: Some("Your Windows license".to_string()),
            data: LicenseData {
                order_number: "1234567890".to_string(),
                customer_name: "Test User".to_string(),
                license_key: "XXXXX-XXXXX-XXXXX-XXXXX-XXXXX".to_string(),
                product_name: Some("Windows 11 Pro".to_string()),
            },
        }
    }
}

/// Get an example of a valid send email request body
#[utoipa::path(
    get,
    operation_id = "sample_request",
    tag = "System",
    path = "/api/v1/sample-request",
    responses(
        (status = StatusCode::OK, description = "Example request body", body = SendEmailBody),
    )
)]
pub async fn handler() -> Json<SendEmailBody> {
    Json(SendEmailBody::sample())
}
