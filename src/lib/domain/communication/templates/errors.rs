//! Template errors

use thiserror::Error;

/// Errors that can occur when resolving or rendering a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template with that name
    #[error("Template '{0}' not found")]
    NotFound(String),

    /// The template exists but could not be read or rendered
    #[error("Error rendering template '{name}': {message}")]
    Render {
        /// The template name
        name: String,

        /// The underlying cause
        message: String,
    },

    /// The template namespace could not be enumerated
    #[error("Error listing templates: {0}")]
    List(#[source] std::io::Error),
}
