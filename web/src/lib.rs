//! Axum integration for the booking marketplace.
//!
//! This crate is the HTTP edge shared by the marketplace services. It holds
//! everything that is about HTTP rather than about bookings or listings:
//!
//! - [`AppError`]: maps domain errors and extractor rejections to JSON
//!   error responses
//! - [`extractors`]: correlation ids and 400-rejecting JSON/query/path
//!   extractors
//! - [`middleware`]: correlation-id propagation and request logging
//! - [`handlers`]: liveness and readiness endpoints
//!
//! # Example
//!
//! ```
//! use axum::{Router, routing::get};
//! use marketplace_web::{correlation_id_layer, handlers::health_check};
//!
//! let app: Router = Router::new()
//!     .route("/health", get(health_check))
//!     .layer(correlation_id_layer());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{ApiJson, ApiPath, ApiQuery, CorrelationId};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
