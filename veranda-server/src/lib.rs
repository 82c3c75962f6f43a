//! HTTP surface of the Veranda society backend.
//!
//! Thin layer over [`veranda_core`]: handlers parse and validate requests,
//! call into the domain services, and shape responses the way the public
//! API documents them. All state lives behind [`AppState`].

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod multipart;
pub mod routes;

pub use errors::{AppError, AppResult};
pub use infra::app_state::AppState;
pub use infra::config::Config;
pub use routes::create_app;
