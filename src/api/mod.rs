//! REST API layer (enabled with the `server` feature)

pub mod norm_routes;
pub mod schemas;

pub use norm_routes::create_norm_router;
