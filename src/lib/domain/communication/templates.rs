//! Email templates module

use async_trait::async_trait;
use serde_json::{Map, Value};

#[cfg(test)]
use mockall::mock;

mod errors;

pub use errors::TemplateError;

/// Variables made available to a template while it renders
pub type TemplateData = Map<String, Value>;

/// Looks up named templates and renders them to HTML
#[async_trait]
pub trait TemplateRenderer: Clone + Send + Sync + 'static {
    /// Whether a template with this name exists.
    ///
    /// Returns `false` rather than failing when the template is absent.
    async fn exists(&self, name: &str) -> bool;

    /// Renders the named template against `data`.
    ///
    /// Variables missing from `data` render as empty text.
    ///
    /// # Returns
    /// The rendered HTML, [`TemplateError::NotFound`] when there is no such
    /// template, or [`TemplateError::Render`] when it cannot be rendered.
    async fn render(&self, name: &str, data: &TemplateData) -> Result<String, TemplateError>;

    /// Lists the names of all known templates.
    async fn list(&self) -> Result<Vec<String>, TemplateError>;
}

#[cfg(test)]
mock! {
    pub TemplateRenderer {}

    impl Clone for TemplateRenderer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl TemplateRenderer for TemplateRenderer {
        async fn exists(&self, name: &str) -> bool;
        async fn render(&self, name: &str, data: &TemplateData) -> Result<String, TemplateError>;
        async fn list(&self) -> Result<Vec<String>, TemplateError>;
    }
}
