//! Inbound license email requests

use serde_json::{Map, Value};

use crate::domain::{
    communication::{email_addresses::EmailAddress, mailer::Recipients, templates::TemplateData},
    licenses::errors::ValidationError,
};

/// Subject used when the request does not supply one
pub const DEFAULT_SUBJECT: &str = "Windows License Delivery";

/// Top-level fields every request must carry
pub const REQUIRED_FIELDS: [&str; 4] = ["templateName", "to", "data", "from"];

/// Template variables every license template relies on.
///
/// `productName` is deliberately not required; templates that use it render
/// it as empty text when it is absent.
pub const REQUIRED_DATA_FIELDS: [&str; 3] = ["orderNumber", "customerName", "licenseKey"];

/// A validated request to send a license delivery email
#[derive(Clone, Debug, PartialEq)]
pub struct EmailRequest {
    template_name: String,
    to: Recipients,
    cc: Option<Recipients>,
    bcc: Option<Recipients>,
    from: EmailAddress,
    subject: Option<String>,
    data: TemplateData,
}

impl EmailRequest {
    /// The name of the template to render
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// The primary recipients
    pub fn to(&self) -> &Recipients {
        &self.to
    }

    /// Carbon-copy recipients, if any
    pub fn cc(&self) -> Option<&Recipients> {
        self.cc.as_ref()
    }

    /// Blind carbon-copy recipients, if any
    pub fn bcc(&self) -> Option<&Recipients> {
        self.bcc.as_ref()
    }

    /// The sender
    pub fn from(&self) -> &EmailAddress {
        &self.from
    }

    /// The subject, or [`DEFAULT_SUBJECT`] when none was given
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or(DEFAULT_SUBJECT)
    }

    /// The template variables
    pub fn data(&self) -> &TemplateData {
        &self.data
    }
}

impl TryFrom<&Value> for EmailRequest {
    type Error = ValidationError;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        let fields = raw.as_object().ok_or(ValidationError::InvalidShape)?;

        if REQUIRED_FIELDS
            .iter()
            .any(|field| !is_truthy(fields.get(*field)))
        {
            return Err(ValidationError::MissingFields);
        }

        let data = fields
            .get("data")
            .and_then(Value::as_object)
            .ok_or(ValidationError::InvalidDataShape)?;

        if REQUIRED_DATA_FIELDS
            .iter()
            .any(|field| !is_truthy(data.get(*field)))
        {
            return Err(ValidationError::MissingDataFields);
        }

        let template_name = fields
            .get("templateName")
            .and_then(Value::as_str)
            .ok_or(ValidationError::InvalidField {
                field: "templateName",
            })?;

        let from = match fields.get("from") {
            Some(Value::String(raw)) => address("from", raw)?,
            _ => return Err(ValidationError::InvalidField { field: "from" }),
        };

        let to = recipients(fields, "to")?.ok_or(ValidationError::InvalidField { field: "to" })?;

        Ok(Self {
            template_name: template_name.to_string(),
            to,
            cc: recipients(fields, "cc")?,
            bcc: recipients(fields, "bcc")?,
            from,
            subject: subject(fields)?,
            data: data.clone(),
        })
    }
}

/// Checks that `raw` is a well-formed request without keeping the result
pub fn validate(raw: &Value) -> Result<(), ValidationError> {
    EmailRequest::try_from(raw).map(|_| ())
}

/// `null`, `false`, `0`, `""` and absent values count as missing.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn address(field: &'static str, raw: &str) -> Result<EmailAddress, ValidationError> {
    EmailAddress::new(raw).map_err(|_| ValidationError::InvalidAddress {
        field,
        address: raw.to_string(),
    })
}

/// A single address or a list of addresses; empty values are treated as absent.
fn recipients(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<Recipients>, ValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) if raw.is_empty() => Ok(None),
        Some(Value::String(raw)) => Ok(Some(Recipients::from(address(field, raw)?))),
        Some(Value::Array(items)) => {
            let addresses = items
                .iter()
                .map(|item| match item {
                    Value::String(raw) => address(field, raw),
                    _ => Err(ValidationError::InvalidField { field }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Recipients::new(addresses))
        }
        Some(_) => Err(ValidationError::InvalidField { field }),
    }
}

fn subject(fields: &Map<String, Value>) -> Result<Option<String>, ValidationError> {
    match fields.get("subject") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(subject)) if subject.is_empty() => Ok(None),
        Some(Value::String(subject)) => Ok(Some(subject.clone())),
        Some(_) => Err(ValidationError::InvalidField { field: "subject" }),
    }
}
