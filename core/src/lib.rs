//! # Marketplace Core
//!
//! Domain types, business rules and storage abstractions for the booking
//! marketplace: users, listings, events and bookings.
//!
//! This crate is the functional core of the workspace. Everything here is
//! either plain data, a pure rule over that data, or a trait describing the
//! storage a service needs. No I/O happens in this crate.
//!
//! ## Modules
//!
//! - [`ids`]: strongly typed identifiers (`UserId`, `ListingId`, ...)
//! - [`user`], [`listing`], [`event`], [`booking`]: entities, request types
//!   and their validation
//! - [`pagination`]: page requests and paginated responses
//! - [`error`]: the domain error taxonomy
//! - [`repository`]: storage traits implemented by `marketplace-postgres`
//!   and `marketplace-testing`
//! - [`session`]: bearer token hashing
//! - [`environment`]: injected dependencies such as the [`environment::Clock`]
//!
//! ## Example
//!
//! ```
//! use marketplace_core::booking::nights_between;
//! use marketplace_core::dates::parse_date_input;
//!
//! let check_in = parse_date_input("2024-06-10").unwrap();
//! let check_out = parse_date_input("2024-06-13").unwrap();
//! assert_eq!(nights_between(check_in, check_out), 3);
//! ```

#![forbid(unsafe_code)]

pub mod booking;
pub mod dates;
pub mod environment;
pub mod error;
pub mod event;
pub mod ids;
pub mod listing;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::{DomainError, StoreError};
pub use ids::{BookingId, EventId, ListingId, UserId};
