// core/src/store/mod.rs

//! Persistence accessor for the `products` table.
//!
//! Every operation is a single parameterized statement: user input is always
//! bound, never spliced into SQL text. Handlers receive the store as an
//! injected `Arc<dyn ProductStore>` rather than reaching for a global.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::model::{Product, ProductId, ProductInput};

pub mod memory;
pub mod mysql;

pub use memory::MemoryProductStore;
pub use mysql::MySqlProductStore;

#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
  /// All products in storage-native order (no ORDER BY).
  async fn list_all(&self) -> CatalogResult<Vec<Product>>;

  async fn get_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

  /// Inserts a row and returns its newly assigned id.
  async fn insert(&self, input: &ProductInput) -> CatalogResult<ProductId>;

  /// Replaces name, price and description. Returns `false` when no row has
  /// this id.
  ///
  /// The MySQL backend reports zero affected rows both for a missing id and
  /// for an update that changes nothing, so in that case it runs a second
  /// `SELECT` to confirm the row is absent.
  async fn update(&self, id: ProductId, input: &ProductInput) -> CatalogResult<bool>;

  /// Deletes by id and returns the number of rows removed. Deleting an absent
  /// id is a successful no-op.
  async fn delete_by_id(&self, id: ProductId) -> CatalogResult<u64>;

  async fn count(&self) -> CatalogResult<u64>;
}
