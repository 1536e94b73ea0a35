// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use product_crud::{DatabaseConfig, ProductInput};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::Level;

// --- Fixtures ---
pub fn input(name: &str, price: &str, description: &str) -> ProductInput {
  ProductInput {
    name: name.to_string(),
    price: Decimal::from_str(price).expect("fixture price must parse"),
    description: description.to_string(),
  }
}

/// Connection settings for the live-MySQL tests, read from `TEST_MYSQL_*`.
pub fn test_database_config() -> DatabaseConfig {
  let var = |name: &str, default: &str| std::env::var(name).unwrap_or_else(|_| default.to_string());
  DatabaseConfig {
    host: var("TEST_MYSQL_HOST", "127.0.0.1"),
    port: var("TEST_MYSQL_PORT", "3306").parse().expect("TEST_MYSQL_PORT must be a port number"),
    user: var("TEST_MYSQL_USER", "root"),
    password: var("TEST_MYSQL_PASSWORD", ""),
    database: var("TEST_MYSQL_DB", "product_crud_test"),
    max_connections: 1,
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
