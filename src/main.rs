use crate::catalog::CatalogCache;
use crate::config::Config;
use crate::query::PropertyService;
use crate::rentvine::{Credentials, RentvineClient};
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use anyhow::{Context, Result};
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod catalog;
mod config;
mod errors;
mod query;
mod rentvine;
mod responses;
mod router;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,property_query=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(subdomain = %config.rentvine_subdomain, "Configuration loaded");

    // 1️⃣ Rentvine client
    let base_url = match config.rentvine_base_url.clone() {
        Some(url) => url,
        None => RentvineClient::tenant_base_url(&config.rentvine_subdomain)
            .context("Failed to build Rentvine URL")?,
    };
    let client = RentvineClient::new(
        base_url,
        Credentials {
            api_key: config.rentvine_api_key.clone(),
            api_secret: config.rentvine_api_secret.clone(),
        },
        config.request_timeout,
    )
    .context("Failed to build HTTP client")?;

    // 2️⃣ Catalog cache, built lazily on the first query
    let cache = CatalogCache::new(Arc::new(client), config.build_options()).with_ttl(config.catalog_ttl);
    let state = AppState {
        service: PropertyService::new(Arc::new(cache)),
    };

    // 3️⃣ Start the server
    tracing::info!(addr = %config.bind_addr, "Starting server");
    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    server
        .serve(move |req, _info| match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(error = %err, "Request rejected");
                error_to_response(err)
            }
        })
        .context("Server ended with error")?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}
