//! HTTP handlers.
//!
//! Handlers only translate: extract the caller and the request, call one
//! service method, and wrap the result. Errors convert into `AppError`.

pub mod bookings;
pub mod events;
pub mod listings;
pub mod users;
