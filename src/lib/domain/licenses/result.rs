//! The uniform outcome of a delivery attempt

use serde::{Deserialize, Serialize};

use crate::domain::{communication::mailer::MessageId, licenses::errors::DeliveryError};

/// Message returned alongside the message id on success
pub const SENT_MESSAGE: &str = "Email sent successfully";

/// The result every adapter receives from the pipeline.
///
/// `status_code` is carried for the adapter and is not part of the serialized body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// Whether the email was sent
    pub success: bool,

    /// HTTP-style status code: 200, 400 or 500
    #[serde(skip_serializing, default)]
    pub status_code: u16,

    /// The provider-assigned message id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message_id: Option<String>,

    /// Human readable success message
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,

    /// Human readable failure reason
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl PipelineResult {
    /// A successful send
    pub fn sent(message_id: MessageId) -> Self {
        Self {
            success: true,
            status_code: 200,
            message_id: Some(message_id.into()),
            message: Some(SENT_MESSAGE.to_string()),
            error: None,
        }
    }

    /// A failed send
    pub fn failed(status_code: u16, error: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code,
            message_id: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

impl From<DeliveryError> for PipelineResult {
    fn from(err: DeliveryError) -> Self {
        PipelineResult::failed(err.status_code(), err.to_string())
    }
}
