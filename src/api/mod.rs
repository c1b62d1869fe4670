//! HTTP adapter: maps the directory operations onto axum routes.

mod error;
mod handlers;
mod routes;

pub use routes::router;
