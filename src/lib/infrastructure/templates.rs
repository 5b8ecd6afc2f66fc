//! Template storage implementations

pub mod files;
