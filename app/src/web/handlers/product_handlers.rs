// app/src/web/handlers/product_handlers.rs

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::{web, HttpRequest, HttpResponse};
use product_crud::{views, CatalogError, ProductForm, ProductId, ProductStore, ALL_FIELDS_REQUIRED};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::FlashSession;

pub const PRODUCT_ADDED: &str = "Product added successfully!";
pub const PRODUCT_UPDATED: &str = "Product updated successfully!";
pub const PRODUCT_DELETED: &str = "Product deleted successfully!";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Form bodies up to this size are accepted. A full `TEXT` description
/// (65,535 bytes) can triple in size once percent-encoded.
pub const MAX_FORM_BYTES: usize = 256 * 1024;

/// Path ids that are not integers can never match a row.
fn parse_id(raw: &str) -> Option<ProductId> {
  raw.parse::<ProductId>().ok()
}

/// Error handler for the form extractor (oversized body, wrong content type,
/// malformed encoding). Answers with a flash and a redirect back to the form
/// instead of a plain-text error page.
pub fn form_rejected(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
  let session = match FlashSession::from_http_request(req) {
    Ok(session) => session,
    Err(e) => return e.into(),
  };
  warn!(error = %err, path = %req.path(), "Rejected unreadable form submission.");

  let location = match req.match_info().get("id") {
    None => "/products/add".to_string(),
    Some(raw) => match parse_id(raw) {
      Some(id) => format!("/products/edit/{}", id),
      None => {
        session.error(PRODUCT_NOT_FOUND);
        return InternalError::from_response(err, session.redirect("/products")).into();
      }
    },
  };
  session.error(ALL_FIELDS_REQUIRED);
  InternalError::from_response(err, session.redirect(&location)).into()
}

pub async fn index_handler(session: FlashSession) -> HttpResponse {
  session.redirect("/products")
}

#[instrument(name = "handler::list_products", skip(app_state, session))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  session: FlashSession,
) -> Result<HttpResponse, AppError> {
  let products = app_state.store.list_all().await?;
  info!("Listing {} products.", products.len());

  let messages = session.drain();
  Ok(session.html(views::render_product_list(&products, &messages)))
}

pub async fn add_product_form_handler(session: FlashSession) -> HttpResponse {
  let messages = session.drain();
  session.html(views::render_add_form(&messages))
}

#[instrument(name = "handler::add_product", skip(app_state, session, form))]
pub async fn add_product_handler(
  app_state: web::Data<AppState>,
  session: FlashSession,
  form: web::Form<ProductForm>,
) -> Result<HttpResponse, AppError> {
  let input = match form.into_inner().validate() {
    Ok(input) => input,
    Err(CatalogError::Validation(message)) => {
      warn!("Rejected add-product submission: {}", message);
      session.error(message);
      return Ok(session.redirect("/products/add"));
    }
    Err(other) => return Err(other.into()),
  };

  let id = app_state.store.insert(&input).await?;
  info!(product_id = %id, "Product added.");

  session.success(PRODUCT_ADDED);
  Ok(session.redirect("/products"))
}

#[instrument(name = "handler::edit_product_form", skip(app_state, session, path), fields(product_id = %path.as_str()))]
pub async fn edit_product_form_handler(
  app_state: web::Data<AppState>,
  session: FlashSession,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product = match parse_id(&path) {
    Some(id) => app_state.store.get_by_id(id).await?,
    None => None,
  };

  match product {
    Some(product) => {
      let messages = session.drain();
      Ok(session.html(views::render_edit_form(&product, &messages)))
    }
    None => {
      warn!("Product {} not found for editing.", path.as_str());
      session.error(PRODUCT_NOT_FOUND);
      Ok(session.redirect("/products"))
    }
  }
}

#[instrument(name = "handler::update_product", skip(app_state, session, path, form), fields(product_id = %path.as_str()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  session: FlashSession,
  path: web::Path<String>,
  form: web::Form<ProductForm>,
) -> Result<HttpResponse, AppError> {
  let Some(id) = parse_id(&path) else {
    warn!("Product {} not found for update.", path.as_str());
    session.error(PRODUCT_NOT_FOUND);
    return Ok(session.redirect("/products"));
  };

  let input = match form.into_inner().validate() {
    Ok(input) => input,
    Err(CatalogError::Validation(message)) => {
      warn!("Rejected edit-product submission: {}", message);
      session.error(message);
      return Ok(session.redirect(&format!("/products/edit/{}", id)));
    }
    Err(other) => return Err(other.into()),
  };

  if app_state.store.update(id, &input).await? {
    info!("Product {} updated.", id);
    session.success(PRODUCT_UPDATED);
  } else {
    warn!("Product {} not found for update.", id);
    session.error(PRODUCT_NOT_FOUND);
  }
  Ok(session.redirect("/products"))
}

#[instrument(name = "handler::delete_product", skip(app_state, session, path), fields(product_id = %path.as_str()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  session: FlashSession,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  if let Some(id) = parse_id(&path) {
    let removed = app_state.store.delete_by_id(id).await?;
    info!(removed, "Delete of product {} processed.", id);
  }

  // Deleting an absent id is still a success.
  session.success(PRODUCT_DELETED);
  Ok(session.redirect("/products"))
}
