//! Adapters connecting the domain to SMTP, the file system, HTTP and serverless runtimes

pub mod email;
pub mod http;
pub mod lambda;
pub mod templates;
