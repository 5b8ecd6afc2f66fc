//! License delivery module

pub mod errors;
mod request;
mod result;
mod service;

pub use request::{
    validate, EmailRequest, DEFAULT_SUBJECT, REQUIRED_DATA_FIELDS, REQUIRED_FIELDS,
};
pub use result::{PipelineResult, SENT_MESSAGE};
pub use service::{LicenseEmailService, LicenseEmailServiceImpl};
