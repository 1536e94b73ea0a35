// core/src/bootstrap.rs

//! Schema bootstrap executed once before the server accepts requests.
//!
//! Sequence per attempt:
//!  1. Connect to the server with no database selected.
//!  2. `CREATE DATABASE IF NOT EXISTS`.
//!  3. Close that connection; open the pool scoped to the target database.
//!  4. `CREATE TABLE IF NOT EXISTS products`.
//!  5. Seed three sample rows if the table is empty.
//!
//! Any failure restarts the whole sequence after a fixed delay. Every step is
//! guarded by an existence check, so a restart never duplicates work.

use rust_decimal::Decimal;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPoolOptions};
use sqlx::{Connection, Executor, MySqlPool};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::model::ProductInput;
use crate::store::{MySqlProductStore, ProductStore};

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
  id INT AUTO_INCREMENT PRIMARY KEY,
  name VARCHAR(100) NOT NULL,
  price DECIMAL(10, 2) NOT NULL,
  description TEXT,
  created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
  updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)
"#;

/// Rows inserted into an empty table: (name, price in cents, description).
const SAMPLE_PRODUCTS: [(&str, i64, &str); 3] = [
  ("Sample Product 1", 1999, "This is a sample product description"),
  ("Sample Product 2", 2999, "Another sample product description"),
  ("Sample Product 3", 3999, "Yet another sample product description"),
];

/// Connection settings for the MySQL server.
#[derive(Clone)]
pub struct DatabaseConfig {
  pub host: String,
  pub port: u16,
  pub user: String,
  pub password: String,
  pub database: String,
  /// Size of the request-serving pool. Defaults to a single connection.
  pub max_connections: u32,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    DatabaseConfig {
      host: "localhost".to_string(),
      port: 3306,
      user: "root".to_string(),
      password: String::new(),
      database: "product_db".to_string(),
      max_connections: 1,
    }
  }
}

// Hand-written so the password never reaches the logs.
impl fmt::Debug for DatabaseConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DatabaseConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("user", &self.user)
      .field("password", &"[REDACTED]")
      .field("database", &self.database)
      .field("max_connections", &self.max_connections)
      .finish()
  }
}

impl DatabaseConfig {
  /// Options for the server-level connection (no database selected).
  fn server_options(&self) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
      .host(&self.host)
      .port(self.port)
      .username(&self.user)
      .password(&self.password)
  }

  fn database_options(&self) -> MySqlConnectOptions {
    self.server_options().database(&self.database)
  }
}

/// Fixed-delay retry: no backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  pub attempts: u32,
  pub delay: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    RetryPolicy {
      attempts: 5,
      delay: Duration::from_secs(5),
    }
  }
}

/// Runs `op` until it succeeds or `policy.attempts` are used up, sleeping
/// `policy.delay` between attempts. `op` receives the 1-based attempt number.
///
/// On exhaustion the last error is wrapped in [`CatalogError::Bootstrap`].
/// An `attempts` of zero is treated as one.
pub async fn retry_fixed<T, F, Fut>(policy: RetryPolicy, mut op: F) -> CatalogResult<T>
where
  F: FnMut(u32) -> Fut,
  Fut: Future<Output = CatalogResult<T>>,
{
  let attempts = policy.attempts.max(1);
  let mut attempt = 1;
  loop {
    match op(attempt).await {
      Ok(value) => return Ok(value),
      Err(e) if attempt >= attempts => {
        warn!(attempt, error = %e, "Final connection attempt failed.");
        return Err(CatalogError::Bootstrap {
          attempts,
          source: Box::new(e),
        });
      }
      Err(e) => {
        warn!(attempt, error = %e, "Connection attempt {} failed, retrying in {:?}.", attempt, policy.delay);
        tokio::time::sleep(policy.delay).await;
        attempt += 1;
      }
    }
  }
}

/// Inserts the fixed sample rows when `store` is empty.
///
/// Returns `true` if rows were inserted.
pub async fn seed_sample_products(store: &dyn ProductStore) -> CatalogResult<bool> {
  if store.count().await? > 0 {
    debug!("Products table already populated, skipping sample data.");
    return Ok(false);
  }

  for (name, cents, description) in SAMPLE_PRODUCTS {
    let input = ProductInput {
      name: name.to_string(),
      price: Decimal::new(cents, 2),
      description: description.to_string(),
    };
    store.insert(&input).await?;
  }
  info!("Sample data inserted.");
  Ok(true)
}

/// Quotes a MySQL identifier with backticks, doubling embedded backticks.
pub fn quote_identifier(ident: &str) -> String {
  format!("`{}`", ident.replace('`', "``"))
}

#[derive(Debug, Clone)]
pub struct Bootstrapper {
  config: DatabaseConfig,
  policy: RetryPolicy,
}

impl Bootstrapper {
  pub fn new(config: DatabaseConfig, policy: RetryPolicy) -> Self {
    Bootstrapper { config, policy }
  }

  /// Provisions the database and table, then returns the pool used by the
  /// persistence layer.
  #[instrument(name = "bootstrap::initialize", skip(self), fields(host = %self.config.host, database = %self.config.database))]
  pub async fn initialize(&self) -> CatalogResult<MySqlPool> {
    info!("Attempting to connect to MySQL...");
    let pool = retry_fixed(self.policy, |attempt| self.attempt(attempt)).await?;
    info!("Connected to MySQL.");
    Ok(pool)
  }

  async fn attempt(&self, attempt: u32) -> CatalogResult<MySqlPool> {
    debug!(attempt, "Starting bootstrap attempt.");

    let mut server_conn = MySqlConnection::connect_with(&self.config.server_options()).await?;
    let create_db = format!(
      "CREATE DATABASE IF NOT EXISTS {}",
      quote_identifier(&self.config.database)
    );
    server_conn.execute(create_db.as_str()).await?;
    info!("Database created or already exists.");
    server_conn.close().await?;

    let pool = MySqlPoolOptions::new()
      .max_connections(self.config.max_connections.max(1))
      .connect_with(self.config.database_options())
      .await?;

    pool.execute(CREATE_PRODUCTS_TABLE).await?;
    info!("Products table created or already exists.");

    let store = MySqlProductStore::new(pool.clone());
    seed_sample_products(&store).await?;

    Ok(pool)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quotes_identifiers() {
    assert_eq!(quote_identifier("product_db"), "`product_db`");
    assert_eq!(quote_identifier("we`ird"), "`we``ird`");
  }

  #[test]
  fn debug_output_redacts_password() {
    let config = DatabaseConfig {
      password: "hunter2".to_string(),
      ..DatabaseConfig::default()
    };
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("[REDACTED]"));
  }

  #[test]
  fn default_policy_is_five_attempts_five_seconds_apart() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.attempts, 5);
    assert_eq!(policy.delay, Duration::from_secs(5));
  }
}
