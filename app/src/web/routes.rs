// app/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::product_handlers;

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(
      web::FormConfig::default()
        .limit(product_handlers::MAX_FORM_BYTES)
        .error_handler(product_handlers::form_rejected),
    )
    .route("/", web::get().to(product_handlers::index_handler))
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("/add", web::get().to(product_handlers::add_product_form_handler))
        .route("/add", web::post().to(product_handlers::add_product_handler))
        .route("/edit/{id}", web::get().to(product_handlers::edit_product_form_handler))
        .route("/edit/{id}", web::post().to(product_handlers::update_product_handler))
        .route("/delete/{id}", web::post().to(product_handlers::delete_product_handler)),
    );
}
