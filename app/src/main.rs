// app/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod state;
mod web;

use crate::config::{AppConfig, StoreBackend};
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use anyhow::Context;
use product_crud::{seed_sample_products, Bootstrapper, MemoryProductStore, MySqlProductStore, ProductStore};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting product catalog server...");

  let app_config = AppConfig::from_env().map_err(|e| {
    tracing::error!(error = %e, "Failed to load application configuration.");
    e
  })?;

  let store: Arc<dyn ProductStore> = match app_config.store_backend {
    StoreBackend::MySql => {
      let pool = Bootstrapper::new(app_config.database.clone(), app_config.bootstrap_retry)
        .initialize()
        .await
        .map_err(|e| {
          tracing::error!(error = %e, "Database bootstrap failed; not starting the server.");
          e
        })?;
      Arc::new(MySqlProductStore::new(pool))
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory product store; data is lost on shutdown.");
      let store = MemoryProductStore::new();
      seed_sample_products(&store).await?;
      Arc::new(store)
    }
  };

  let app_state = AppState::new(store);

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")?;

  Ok(())
}
