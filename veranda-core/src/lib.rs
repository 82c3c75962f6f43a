//! # Veranda Core
//!
//! Core library for the Veranda society backend: domain services, repository
//! ports, and infrastructure adapters.
//!
//! ## Overview
//!
//! - [`domain::media`]: the media-backed resource store — upload validation,
//!   index-based retention merges, derived media URLs, and byte resolution
//!   for events and property listings
//! - [`database`]: repository ports plus their Postgres implementations and
//!   the connection pool wrapper
//! - [`gateway`]: the payment-gateway port and its Razorpay adapter
//! - [`error`]: the crate-wide error taxonomy
//!
//! Handlers depend only on the ports; production wiring hands them the
//! Postgres adapters, tests hand them in-memory implementations.

pub mod database;
pub mod domain;
pub mod error;
pub mod gateway;

pub use error::{CoreError, Result};

/// Embedded schema migrations, applied at startup by
/// [`database::PostgresDatabase::initialize_schema`].
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
