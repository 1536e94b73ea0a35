// core/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  /// Every bootstrap attempt failed; the server must not start.
  #[error("Failed to connect to database after {attempts} attempts. Last error: {source}")]
  Bootstrap {
    attempts: u32,
    #[source]
    source: Box<CatalogError>,
  },

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Database error: {0}")]
  Query(#[from] sqlx::Error),

  #[error("Internal catalog error: {0}")]
  Internal(String),
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
