// core/src/validation.rs

//! Form payload parsing for the add/edit product flows.
//!
//! Validation is presence-only: every field must be submitted and non-empty.
//! The price additionally has to parse as a decimal so it can be bound as a
//! typed parameter; no range or format rules are applied beyond that.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::model::ProductInput;

/// Flash text shown whenever a form submission is rejected.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required!";

/// Raw urlencoded form body. Missing fields deserialize to `None`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProductForm {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub price: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
}

impl ProductForm {
  pub fn validate(self) -> CatalogResult<ProductInput> {
    let name = required(self.name)?;
    let raw_price = required(self.price)?;
    let description = required(self.description)?;

    let mut price = Decimal::from_str(&raw_price).map_err(|e| {
      debug!(price = %raw_price, error = %e, "Rejected non-numeric price.");
      CatalogError::Validation(ALL_FIELDS_REQUIRED.to_string())
    })?;
    // DECIMAL(10, 2)
    price.rescale(2);

    Ok(ProductInput {
      name,
      price,
      description,
    })
  }
}

fn required(field: Option<String>) -> CatalogResult<String> {
  match field {
    Some(value) if !value.is_empty() => Ok(value),
    _ => Err(CatalogError::Validation(ALL_FIELDS_REQUIRED.to_string())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(name: &str, price: &str, description: &str) -> ProductForm {
    ProductForm {
      name: Some(name.to_string()),
      price: Some(price.to_string()),
      description: Some(description.to_string()),
    }
  }

  #[test]
  fn accepts_complete_form() {
    let input = form("Widget", "9.99", "d").validate().unwrap();
    assert_eq!(input.name, "Widget");
    assert_eq!(input.price, Decimal::new(999, 2));
    assert_eq!(input.description, "d");
  }

  #[test]
  fn rejects_empty_name() {
    let err = form("", "9.99", "d").validate().unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ref m) if m == ALL_FIELDS_REQUIRED));
  }

  #[test]
  fn rejects_missing_fields() {
    assert!(ProductForm::default().validate().is_err());
    let no_description = ProductForm {
      description: None,
      ..form("Widget", "1", "x")
    };
    assert!(no_description.validate().is_err());
  }

  #[test]
  fn rejects_non_numeric_price() {
    assert!(form("Widget", "cheap", "d").validate().is_err());
  }

  #[test]
  fn whitespace_counts_as_present() {
    // Presence-only: no trimming.
    assert!(form(" ", "1", " ").validate().is_ok());
  }

  #[test]
  fn negative_price_is_not_range_checked() {
    let input = form("Refund", "-3.5", "d").validate().unwrap();
    assert_eq!(input.price, Decimal::new(-350, 2));
  }

  #[test]
  fn price_is_held_at_two_decimal_places() {
    assert_eq!(form("Widget", "1.005", "d").validate().unwrap().price.scale(), 2);
    let whole = form("Widget", "7", "d").validate().unwrap().price;
    assert_eq!(whole.to_string(), "7.00");
  }
}
