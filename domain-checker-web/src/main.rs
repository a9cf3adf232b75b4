//! HTTP entry point for the domain checker.
//!
//! Serves `GET /check/all?url=...` (WHOIS registration + TLS certificate check)
//! and `GET /health`.

mod config;
mod error;
mod handlers;
mod logging;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use domain_checker_core::DomainChecker;

use crate::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let _log_guard = logging::init(&config.log)?;

    let checker = DomainChecker::with_defaults(config.whois.options())
        .context("failed to initialise domain checker")?;
    let checker = web::Data::new(checker);

    let bind = (config.server.host.clone(), config.server.port);
    tracing::info!(
        host = %bind.0,
        port = bind.1,
        workers = config.server.workers,
        whois_timeout_secs = config.whois.timeout_secs,
        "Starting domain checker"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(checker.clone())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .workers(config.server.workers.max(1))
    .bind(&bind)
    .with_context(|| format!("failed to bind {}:{}", bind.0, bind.1))?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("Domain checker stopped");
    Ok(())
}
