//! Router configuration for the marketplace.
//!
//! Builds the complete Axum router with all endpoints.

use super::state::AppState;
use crate::api::{bookings, events, listings, users};
use axum::{
    Router,
    routing::{get, patch, post},
};
use marketplace_web::correlation_id_layer;
use marketplace_web::handlers::{health_check, readiness};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Routes sit at the root, without a version prefix. Authentication is
/// enforced per handler through the `SessionUser` extractor.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health checks (no authentication)
        .route("/health", get(health_check))
        .route("/ready", get(readiness))
        // Bookings
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/my-bookings", get(bookings::my_bookings))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/cancel", patch(bookings::cancel_booking))
        // Listings
        .route(
            "/listings",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route("/listings/my-listings", get(listings::my_listings))
        .route(
            "/listings/:id",
            get(listings::get_listing)
                .patch(listings::update_listing)
                .delete(listings::delete_listing),
        )
        // Events
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/:id", get(events::get_event))
        .route("/events/:id/listings", get(events::listings_near_event))
        // Users
        .route("/users/me", get(users::get_me).patch(users::update_me))
        .route("/users/:id", get(users::get_user).patch(users::update_user))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(correlation_id_layer())
        .with_state(state)
}
