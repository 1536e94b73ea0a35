// app/src/errors.rs

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use product_crud::{views, CatalogError};
use thiserror::Error;

/// Shown for any failure the user cannot fix by resubmitting a form.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Catalog Error: {0}")]
  Catalog(#[from] CatalogError),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

// Validation and missing products never get here: handlers turn them into a
// flash message and a redirect.
impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    // Details stay in the log; the page only says something failed.
    HttpResponse::build(self.status_code())
      .content_type(ContentType::html())
      .body(views::render_error_page(GENERIC_FAILURE))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn query_failures_hide_details() {
    let err = AppError::from(CatalogError::Query(sqlx::Error::PoolTimedOut));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
