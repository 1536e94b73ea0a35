// core/src/store/memory.rs

//! In-process [`ProductStore`] with the same observable semantics as the
//! MySQL table: ids come from a monotonic counter and are never reused,
//! `created_at` is fixed at insert, `updated_at` is refreshed on update.
//! Useful for tests and for running the server without a database.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductId, ProductInput};
use crate::store::ProductStore;

#[derive(Debug, Default)]
struct Table {
  last_id: ProductId,
  rows: Vec<Product>,
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
  table: Mutex<Table>,
}

impl MemoryProductStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
  async fn list_all(&self) -> CatalogResult<Vec<Product>> {
    Ok(self.table.lock().rows.clone())
  }

  async fn get_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
    Ok(self.table.lock().rows.iter().find(|p| p.id == id).cloned())
  }

  async fn insert(&self, input: &ProductInput) -> CatalogResult<ProductId> {
    let mut table = self.table.lock();
    let id = table
      .last_id
      .checked_add(1)
      .ok_or_else(|| CatalogError::Internal("Product id space exhausted.".to_string()))?;
    let now = Utc::now();
    table.rows.push(Product {
      id,
      name: input.name.clone(),
      price: input.price,
      description: Some(input.description.clone()),
      created_at: now,
      updated_at: now,
    });
    table.last_id = id;
    Ok(id)
  }

  async fn update(&self, id: ProductId, input: &ProductInput) -> CatalogResult<bool> {
    let mut table = self.table.lock();
    match table.rows.iter_mut().find(|p| p.id == id) {
      Some(product) => {
        product.name = input.name.clone();
        product.price = input.price;
        product.description = Some(input.description.clone());
        product.updated_at = Utc::now().max(product.updated_at);
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn delete_by_id(&self, id: ProductId) -> CatalogResult<u64> {
    let mut table = self.table.lock();
    let before = table.rows.len();
    table.rows.retain(|p| p.id != id);
    Ok((before - table.rows.len()) as u64)
  }

  async fn count(&self) -> CatalogResult<u64> {
    Ok(self.table.lock().rows.len() as u64)
  }
}
