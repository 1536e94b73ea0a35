// app/src/web/mod.rs

// Declare child modules
pub mod handlers;
pub mod routes;
pub mod session;

// Re-export so main.rs can configure the App directly.
pub use routes::configure_app_routes;
