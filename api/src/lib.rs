//! # Marketplace API
//!
//! HTTP server for the booking marketplace: listings published by hosts,
//! events that guests travel to, and the bookings that connect them.
//!
//! ## Layout
//!
//! - [`config`]: environment-driven configuration
//! - [`services`]: one service per resource, over the repository traits
//! - [`auth`]: bearer-session extractors
//! - [`api`]: Axum handlers
//! - [`server`]: application state and router
//! - [`metrics`]: Prometheus business metrics
//!
//! ## Example
//!
//! ```
//! use marketplace_api::{AppState, build_router, config::BookingConfig};
//! use marketplace_core::environment::SystemClock;
//! use marketplace_testing::InMemoryMarketplace;
//! use std::sync::Arc;
//!
//! let state = AppState::new(
//!     InMemoryMarketplace::new(),
//!     Arc::new(SystemClock),
//!     BookingConfig::default(),
//! );
//! let app = build_router(state);
//! # let _ = app;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod auth;
pub mod config;
pub mod metrics;
pub mod server;
pub mod services;

pub use config::Config;
pub use server::{AppState, build_router};
