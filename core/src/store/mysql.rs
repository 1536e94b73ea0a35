// core/src/store/mysql.rs

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, error, instrument};

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductId, ProductInput};
use crate::store::ProductStore;

/// [`ProductStore`] over the connection handle returned by the bootstrapper.
#[derive(Debug, Clone)]
pub struct MySqlProductStore {
  pool: MySqlPool,
}

impl MySqlProductStore {
  pub fn new(pool: MySqlPool) -> Self {
    MySqlProductStore { pool }
  }
}

#[async_trait]
impl ProductStore for MySqlProductStore {
  #[instrument(name = "store::list_all", skip(self), err)]
  async fn list_all(&self) -> CatalogResult<Vec<Product>> {
    let products: Vec<Product> =
      sqlx::query_as("SELECT id, name, price, description, created_at, updated_at FROM products")
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
          error!("Failed to fetch products from database: {}", e);
          CatalogError::Query(e)
        })?;

    debug!("Fetched {} products.", products.len());
    Ok(products)
  }

  #[instrument(name = "store::get_by_id", skip(self), err)]
  async fn get_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
    let product = sqlx::query_as(
      "SELECT id, name, price, description, created_at, updated_at FROM products WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(product)
  }

  #[instrument(name = "store::insert", skip(self, input), fields(name = %input.name), err)]
  async fn insert(&self, input: &ProductInput) -> CatalogResult<ProductId> {
    let result = sqlx::query("INSERT INTO products (name, price, description) VALUES (?, ?, ?)")
      .bind(&input.name)
      .bind(input.price)
      .bind(&input.description)
      .execute(&self.pool)
      .await?;

    let raw_id = result.last_insert_id();
    ProductId::try_from(raw_id)
      .map_err(|_| CatalogError::Internal(format!("Inserted id {} does not fit the id column type.", raw_id)))
  }

  #[instrument(name = "store::update", skip(self, input), err)]
  async fn update(&self, id: ProductId, input: &ProductInput) -> CatalogResult<bool> {
    let result = sqlx::query("UPDATE products SET name = ?, price = ?, description = ? WHERE id = ?")
      .bind(&input.name)
      .bind(input.price)
      .bind(&input.description)
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() > 0 {
      return Ok(true);
    }

    // Zero affected rows is also what MySQL reports for an update that
    // changed nothing, so confirm the row is really gone.
    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?")
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(exists.is_some())
  }

  #[instrument(name = "store::delete_by_id", skip(self), err)]
  async fn delete_by_id(&self, id: ProductId) -> CatalogResult<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }

  async fn count(&self) -> CatalogResult<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
      .fetch_one(&self.pool)
      .await?;
    Ok(count.max(0) as u64)
  }
}
