// core/src/model.rs

//! Data structures representing rows of the `products` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Primary key type of the `products` table (`INT AUTO_INCREMENT`).
pub type ProductId = i32;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub price: Decimal,              // DECIMAL(10, 2)
  pub description: Option<String>, // TEXT, nullable at the storage level
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Validated field set written by the add and edit flows.
///
/// Produced by [`crate::validation::ProductForm::validate`]; there is no other
/// way for handler code to build one from request input.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
  pub name: String,
  pub price: Decimal,
  pub description: String,
}
