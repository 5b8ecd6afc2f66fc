//! Email communication module

pub mod email_addresses;
pub mod mailer;
pub mod templates;
