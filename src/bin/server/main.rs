#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! REST API for license email delivery

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use license_mailer::{
    domain::licenses::LicenseEmailServiceImpl,
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPMailer},
        http::{servers::http::HttpServer, state::AppState, HttpServerConfig, Server},
        templates::files::{FileTemplates, TemplatesConfig},
    },
};
use tracing::{info, warn};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The SMTP relay configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// Where templates are read from
    #[clap(flatten)]
    pub templates: TemplatesConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load environment: {}", e);

            return Err(e.into());
        }
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if !args.smtp.is_complete() {
        warn!("SMTP configuration is incomplete; send requests will fail until it is set");
    }

    info!(
        templates = %args.templates.path.display(),
        "loading templates"
    );

    let emails = LicenseEmailServiceImpl::new(
        Arc::new(SMTPMailer::new(args.smtp)),
        Arc::new(FileTemplates::new(args.templates.path)),
    );

    HttpServer::new(&args.server, AppState::new(emails))
        .await?
        .run()
        .await
}
