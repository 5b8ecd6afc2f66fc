//! Application state module

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

use crate::domain::licenses::LicenseEmailService;

/// Global application state
#[derive(Clone)]
pub struct AppState<S: LicenseEmailService> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// License email service
    pub emails: Arc<S>,
}

/// Implementation of the application state
impl<S> AppState<S>
where
    S: LicenseEmailService,
{
    /// Create a new application state
    pub fn new(emails: S) -> Self {
        Self {
            start_time: Utc::now(),
            emails: Arc::new(emails),
        }
    }
}

impl<S> fmt::Debug for AppState<S>
where
    S: LicenseEmailService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("emails", &"LicenseEmailService")
            .finish()
    }
}
