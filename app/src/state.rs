// app/src/state.rs
use product_crud::{FlashStore, ProductStore};
use std::sync::Arc;

/// Shared by every worker; each handler receives it through `web::Data`.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ProductStore>,
  pub flashes: Arc<FlashStore>,
}

impl AppState {
  pub fn new(store: Arc<dyn ProductStore>) -> Self {
    AppState {
      store,
      flashes: Arc::new(FlashStore::new()),
    }
  }
}
