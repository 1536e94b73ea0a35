// app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use product_crud::{DatabaseConfig, RetryPolicy};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which [`product_crud::ProductStore`] backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  MySql,
  /// In-process store, no database or bootstrap. Data is lost on restart.
  Memory,
}

impl FromStr for StoreBackend {
  type Err = AppError;

  fn from_str(raw: &str) -> Result<Self> {
    match raw.to_ascii_lowercase().as_str() {
      "mysql" => Ok(StoreBackend::MySql),
      "memory" => Ok(StoreBackend::Memory),
      other => Err(AppError::Config(format!(
        "Invalid STORE_BACKEND '{}': expected 'mysql' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database: DatabaseConfig,
  pub bootstrap_retry: RetryPolicy,
  pub store_backend: StoreBackend,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from an arbitrary variable source.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var("PORT", &get_or("PORT", "3000"))?;

    let user = lookup("MYSQL_USER").unwrap_or_else(|| {
      tracing::warn!("MYSQL_USER not set, falling back to 'root'.");
      "root".to_string()
    });
    let password = lookup("MYSQL_PASSWORD").unwrap_or_else(|| {
      tracing::warn!("MYSQL_PASSWORD not set, using an empty password.");
      String::new()
    });
    let database = DatabaseConfig {
      host: get_or("MYSQL_HOST", "localhost"),
      port: parse_var("MYSQL_PORT", &get_or("MYSQL_PORT", "3306"))?,
      user,
      password,
      database: get_or("MYSQL_DB", "product_db"),
      max_connections: parse_var("MYSQL_MAX_CONNECTIONS", &get_or("MYSQL_MAX_CONNECTIONS", "1"))?,
    };

    let defaults = RetryPolicy::default();
    let bootstrap_retry = RetryPolicy {
      attempts: parse_var(
        "DB_INIT_RETRIES",
        &get_or("DB_INIT_RETRIES", &defaults.attempts.to_string()),
      )?,
      delay: Duration::from_secs(parse_var(
        "DB_INIT_RETRY_DELAY_SECS",
        &get_or("DB_INIT_RETRY_DELAY_SECS", &defaults.delay.as_secs().to_string()),
      )?),
    };

    let store_backend = get_or("STORE_BACKEND", "mysql").parse::<StoreBackend>()?;

    tracing::info!("Application configuration loaded successfully.");
    // DatabaseConfig's Debug output redacts the password.
    tracing::debug!(database = ?database, "Loaded database settings");

    Ok(Self {
      server_host,
      server_port,
      database,
      bootstrap_retry,
      store_backend,
    })
  }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))
}
