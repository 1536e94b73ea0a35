// tests/memory_store_tests.rs
mod common;
use common::*;
use product_crud::{MemoryProductStore, ProductStore};
use rust_decimal::Decimal;

#[tokio::test]
async fn insert_then_fetch_returns_same_fields() {
  setup_tracing();
  let store = MemoryProductStore::new();
  let id = store.insert(&input("Widget", "9.99", "d")).await.unwrap();

  let product = store.get_by_id(id).await.unwrap().expect("inserted product");
  assert_eq!(product.id, id);
  assert_eq!(product.name, "Widget");
  assert_eq!(product.price, Decimal::new(999, 2));
  assert_eq!(product.description.as_deref(), Some("d"));
  assert!(product.updated_at >= product.created_at);
}

#[tokio::test]
async fn list_all_preserves_insertion_order() {
  let store = MemoryProductStore::new();
  for name in ["a", "b", "c"] {
    store.insert(&input(name, "1", "x")).await.unwrap();
  }
  let names: Vec<String> = store.list_all().await.unwrap().into_iter().map(|p| p.name).collect();
  assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn delete_is_idempotent() {
  let store = MemoryProductStore::new();
  let id = store.insert(&input("Widget", "9.99", "d")).await.unwrap();

  assert_eq!(store.delete_by_id(id).await.unwrap(), 1);
  assert!(store.list_all().await.unwrap().iter().all(|p| p.id != id));
  assert_eq!(store.delete_by_id(id).await.unwrap(), 0);
  assert_eq!(store.delete_by_id(999_999).await.unwrap(), 0);
}

#[tokio::test]
async fn ids_are_never_reused() {
  let store = MemoryProductStore::new();
  let first = store.insert(&input("a", "1", "x")).await.unwrap();
  store.delete_by_id(first).await.unwrap();
  let second = store.insert(&input("b", "1", "x")).await.unwrap();
  assert!(second > first);
}

#[tokio::test]
async fn update_replaces_fields_and_refreshes_timestamp() {
  let store = MemoryProductStore::new();
  let id = store.insert(&input("Widget", "9.99", "d")).await.unwrap();
  let before = store.get_by_id(id).await.unwrap().unwrap();

  assert!(store.update(id, &input("X", "1.00", "")).await.unwrap());

  let after = store.get_by_id(id).await.unwrap().unwrap();
  assert_eq!(after.name, "X");
  assert_eq!(after.price, Decimal::new(100, 2));
  assert_eq!(after.description.as_deref(), Some(""));
  assert_eq!(after.created_at, before.created_at);
  assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn update_of_missing_id_reports_absence() {
  let store = MemoryProductStore::new();
  assert!(!store.update(42, &input("X", "1", "x")).await.unwrap());
  assert_eq!(store.count().await.unwrap(), 0);
}
