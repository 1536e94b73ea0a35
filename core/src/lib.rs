// src/lib.rs

//! product_crud: storage and rendering for a small server-rendered product catalog.
//!
//! The crate provides:
//!  - A `Product` model mapped onto a MySQL `products` table.
//!  - Presence-only validation of add/edit form payloads.
//!  - The `ProductStore` persistence trait with MySQL and in-memory backends.
//!  - A schema bootstrapper that creates the database and table, seeds sample
//!    rows, and retries the whole sequence with a fixed delay.
//!  - A session-scoped flash message store with explicit `drain`.
//!  - Pure HTML view functions.
//!
//! The HTTP layer lives in the `product_crud_web` application crate.

pub mod bootstrap;
pub mod error;
pub mod flash;
pub mod model;
pub mod store;
pub mod validation;
pub mod views;

// --- Re-exports for the Public API ---

pub use crate::bootstrap::{retry_fixed, seed_sample_products, Bootstrapper, DatabaseConfig, RetryPolicy};
pub use crate::error::{CatalogError, CatalogResult};
pub use crate::flash::{FlashKind, FlashMessage, FlashStore, SessionId};
pub use crate::model::{Product, ProductId, ProductInput};
pub use crate::store::{MemoryProductStore, MySqlProductStore, ProductStore};
pub use crate::validation::{ProductForm, ALL_FIELDS_REQUIRED};
