// app/src/web/session.rs

//! Binds the flash store to the browser session making the request.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::{self, ContentType};
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, HttpResponseBuilder};
use futures_util::future::{ready, Ready};
use product_crud::{FlashKind, FlashMessage, FlashStore, SessionId};
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "product_crud_session";

/// Request-scoped view of one session's flash messages.
///
/// Sessions are identified by a random id in an HTTP-only cookie. A request
/// without a valid cookie starts a new session, and every response built
/// through [`FlashSession::redirect`] or [`FlashSession::html`] then carries
/// the cookie.
pub struct FlashSession {
  id: SessionId,
  is_new: bool,
  store: Arc<FlashStore>,
}

impl FlashSession {
  pub fn flash(&self, kind: FlashKind, text: impl Into<String>) {
    self.store.set(self.id, kind, text);
  }

  pub fn success(&self, text: impl Into<String>) {
    self.flash(FlashKind::Success, text);
  }

  pub fn error(&self, text: impl Into<String>) {
    self.flash(FlashKind::Error, text);
  }

  /// Takes every pending message. Call once per rendered page.
  pub fn drain(&self) -> Vec<FlashMessage> {
    self.store.drain(self.id)
  }

  /// 302 to `location`.
  pub fn redirect(&self, location: &str) -> HttpResponse {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    self.finish(builder, None)
  }

  /// 200 with an HTML body.
  pub fn html(&self, body: String) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder.content_type(ContentType::html());
    self.finish(builder, Some(body))
  }

  fn finish(&self, mut builder: HttpResponseBuilder, body: Option<String>) -> HttpResponse {
    if self.is_new {
      builder.cookie(
        Cookie::build(SESSION_COOKIE, self.id.to_string())
          .path("/")
          .http_only(true)
          .same_site(SameSite::Lax)
          .finish(),
      );
    }
    match body {
      Some(body) => builder.body(body),
      None => builder.finish(),
    }
  }
}

impl FlashSession {
  /// Resolves the session outside the extractor machinery, e.g. from an
  /// extractor error handler.
  pub fn from_http_request(req: &HttpRequest) -> Result<Self, AppError> {
    let store = match req.app_data::<web::Data<AppState>>() {
      Some(state) => state.flashes.clone(),
      None => {
        error!("FlashSession extractor: AppState is not registered.");
        return Err(AppError::Internal("Application state missing.".to_string()));
      }
    };

    let existing = req
      .cookie(SESSION_COOKIE)
      .and_then(|cookie| SessionId::parse(cookie.value()));

    let session = match existing {
      Some(id) => FlashSession {
        id,
        is_new: false,
        store,
      },
      None => {
        let id = SessionId::generate();
        debug!(session = %id, "Starting new session.");
        FlashSession { id, is_new: true, store }
      }
    };
    Ok(session)
  }
}

impl FromRequest for FlashSession {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(FlashSession::from_http_request(req))
  }
}
