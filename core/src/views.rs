// core/src/views.rs

//! Server-side HTML rendering.
//!
//! Each function is a pure mapping from data and drained flash messages to an
//! HTML document. Every interpolated value goes through [`escape_html`].

use std::fmt::Write;

use crate::flash::FlashMessage;
use crate::model::Product;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
  let mut escaped = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

fn layout(title: &str, messages: &[FlashMessage], body: &str) -> String {
  let mut html = String::new();
  let _ = write!(
    html,
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<main class=\"container\">\n",
    escape_html(title)
  );
  for message in messages {
    let _ = writeln!(
      html,
      "<div class=\"alert alert-{}\" role=\"alert\">{}</div>",
      message.kind.as_str(),
      escape_html(&message.text)
    );
  }
  html.push_str(body);
  html.push_str("</main>\n</body>\n</html>\n");
  html
}

pub fn render_product_list(products: &[Product], messages: &[FlashMessage]) -> String {
  let mut body = String::new();
  body.push_str("<h1>Products</h1>\n<a class=\"button\" href=\"/products/add\">Add Product</a>\n");

  if products.is_empty() {
    body.push_str("<p class=\"empty\">No products found.</p>\n");
    return layout("Products", messages, &body);
  }

  body.push_str(
    "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Price</th><th>Description</th><th>Actions</th></tr></thead>\n<tbody>\n",
  );
  for product in products {
    let _ = write!(
      body,
      "<tr><td>{id}</td><td>{name}</td><td>{price}</td><td>{description}</td><td>\
<a href=\"/products/edit/{id}\">Edit</a> \
<form action=\"/products/delete/{id}\" method=\"POST\" class=\"inline\">\
<button type=\"submit\">Delete</button></form></td></tr>\n",
      id = product.id,
      name = escape_html(&product.name),
      price = product.price,
      description = escape_html(product.description.as_deref().unwrap_or("")),
    );
  }
  body.push_str("</tbody>\n</table>\n");
  layout("Products", messages, &body)
}

struct FormValues<'a> {
  name: &'a str,
  price: String,
  description: &'a str,
}

fn product_form(action: &str, submit_label: &str, values: &FormValues<'_>) -> String {
  format!(
    "<form action=\"{action}\" method=\"POST\">\n\
<label for=\"name\">Name</label>\n<input type=\"text\" id=\"name\" name=\"name\" value=\"{name}\" required>\n\
<label for=\"price\">Price</label>\n<input type=\"number\" step=\"0.01\" id=\"price\" name=\"price\" value=\"{price}\" required>\n\
<label for=\"description\">Description</label>\n<textarea id=\"description\" name=\"description\" required>{description}</textarea>\n\
<button type=\"submit\">{submit_label}</button>\n<a href=\"/products\">Cancel</a>\n</form>\n",
    action = escape_html(action),
    name = escape_html(values.name),
    price = escape_html(&values.price),
    description = escape_html(values.description),
    submit_label = escape_html(submit_label),
  )
}

pub fn render_add_form(messages: &[FlashMessage]) -> String {
  let values = FormValues {
    name: "",
    price: String::new(),
    description: "",
  };
  let body = format!("<h1>Add Product</h1>\n{}", product_form("/products/add", "Add Product", &values));
  layout("Add Product", messages, &body)
}

pub fn render_edit_form(product: &Product, messages: &[FlashMessage]) -> String {
  let values = FormValues {
    name: &product.name,
    price: product.price.to_string(),
    description: product.description.as_deref().unwrap_or(""),
  };
  let action = format!("/products/edit/{}", product.id);
  let body = format!("<h1>Edit Product</h1>\n{}", product_form(&action, "Update Product", &values));
  layout("Edit Product", messages, &body)
}

/// Standalone page for failures that cannot be reported through a redirect.
pub fn render_error_page(message: &str) -> String {
  let messages = [FlashMessage {
    kind: crate::flash::FlashKind::Error,
    text: message.to_string(),
  }];
  layout(
    "Error",
    &messages,
    "<p><a href=\"/products\">Back to products</a></p>\n",
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::flash::FlashKind;
  use chrono::Utc;
  use rust_decimal::Decimal;

  fn product(id: i32, name: &str) -> Product {
    let now = Utc::now();
    Product {
      id,
      name: name.to_string(),
      price: Decimal::new(1999, 2),
      description: Some("desc".to_string()),
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn escapes_markup() {
    assert_eq!(escape_html("<b>\"Tom & Jerry's\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;");
  }

  #[test]
  fn list_renders_each_product_with_actions() {
    let html = render_product_list(&[product(1, "Widget"), product(2, "Gadget")], &[]);
    assert!(html.contains("<td>Widget</td>"));
    assert!(html.contains("<td>19.99</td>"));
    assert!(html.contains("href=\"/products/edit/2\""));
    assert!(html.contains("action=\"/products/delete/1\""));
    assert!(!html.contains("No products found."));
  }

  #[test]
  fn list_renders_flash_messages_by_kind() {
    let messages = vec![FlashMessage {
      kind: FlashKind::Success,
      text: "Product added successfully!".to_string(),
    }];
    let html = render_product_list(&[], &messages);
    assert!(html.contains("alert-success"));
    assert!(html.contains("Product added successfully!"));
    assert!(html.contains("No products found."));
  }

  #[test]
  fn edit_form_is_prefilled_and_escaped() {
    let html = render_edit_form(&product(7, "<script>"), &[]);
    assert!(html.contains("action=\"/products/edit/7\""));
    assert!(html.contains("value=\"&lt;script&gt;\""));
    assert!(html.contains("value=\"19.99\""));
    assert!(!html.contains("<script>"));
  }

  #[test]
  fn add_form_posts_to_add_route() {
    let html = render_add_form(&[]);
    assert!(html.contains("action=\"/products/add\""));
    assert!(html.contains("name=\"description\""));
  }

  #[test]
  fn error_page_uses_error_alert() {
    let html = render_error_page("Something went wrong.");
    assert!(html.contains("alert-error"));
    assert!(html.contains("Something went wrong."));
  }
}
