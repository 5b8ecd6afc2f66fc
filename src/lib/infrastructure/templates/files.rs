//! File-backed Handlebars templates

use std::{ffi::OsStr, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use clap::Parser;
use handlebars::Handlebars;
use tokio::fs;
use tracing::debug;

use crate::domain::communication::templates::{TemplateData, TemplateError, TemplateRenderer};

/// File extension of template files
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Template storage configuration
#[derive(Debug, Clone, Parser)]
pub struct TemplatesConfig {
    /// Directory holding one `<name>.hbs` file per template
    #[clap(long = "templates-path", env = "TEMPLATES_PATH", default_value = "templates")]
    pub path: PathBuf,
}

/// Templates stored as `<root>/<name>.hbs`
#[derive(Debug, Clone)]
pub struct FileTemplates {
    root: PathBuf,
}

impl FileTemplates {
    /// Creates a template store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a template name to its file, or `None` for names that could
    /// escape the template directory.
    fn path_for(&self, name: &str) -> Option<PathBuf> {
        is_valid_name(name).then(|| self.root.join(format!("{name}.{TEMPLATE_EXTENSION}")))
    }
}

/// Names are single path components: no separators, no `..`, no hidden files.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && !name.contains(&['/', '\\', '\0'][..])
}

#[async_trait]
impl TemplateRenderer for FileTemplates {
    async fn exists(&self, name: &str) -> bool {
        match self.path_for(name) {
            Some(path) => fs::metadata(&path)
                .await
                .map(|metadata| metadata.is_file())
                .unwrap_or(false),
            None => false,
        }
    }

    async fn render(&self, name: &str, data: &TemplateData) -> Result<String, TemplateError> {
        let path = self
            .path_for(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;

        let source = match fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(TemplateError::NotFound(name.to_string()))
            }
            Err(err) => {
                return Err(TemplateError::Render {
                    name: name.to_string(),
                    message: err.to_string(),
                })
            }
        };

        debug!(template = name, path = %path.display(), "rendering template");

        Handlebars::new()
            .render_template(&source, data)
            .map_err(|err| TemplateError::Render {
                name: name.to_string(),
                message: err.to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<String>, TemplateError> {
        let mut entries = fs::read_dir(&self.root).await.map_err(TemplateError::List)?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(TemplateError::List)? {
            let path = entry.path();

            if path.extension().and_then(OsStr::to_str) != Some(TEMPLATE_EXTENSION) {
                continue;
            }

            match path.file_stem().and_then(OsStr::to_str) {
                Some(name) if is_valid_name(name) => names.push(name.to_string()),
                _ => {}
            }
        }

        names.sort();

        Ok(names)
    }
}
