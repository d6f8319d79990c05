//! Application state for the marketplace HTTP server.
//!
//! Holds one service per resource plus what the authentication guard and
//! the readiness probe need. Every field is a cheap `Arc` clone.

use crate::config::BookingConfig;
use crate::services::{BookingService, EventService, ListingService, UserService};
use axum::extract::FromRef;
use marketplace_core::environment::Clock;
use marketplace_core::repository::{
    BookingRepository, EventRepository, HealthProbe, ListingRepository, SessionRepository,
    UserRepository,
};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Booking operations
    pub bookings: BookingService,
    /// Listing operations
    pub listings: ListingService,
    /// Event operations
    pub events: EventService,
    /// Profile operations
    pub users: UserService,
    /// Bearer session lookup
    pub sessions: Arc<dyn SessionRepository>,
    /// Readiness probe of the backing store
    pub health: Arc<dyn HealthProbe>,
    /// Time source for session expiry
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire every service to one store implementing all repositories.
    ///
    /// Used with `PostgresMarketplace` in production and with the in-memory
    /// store in tests.
    #[must_use]
    pub fn new<S>(store: S, clock: Arc<dyn Clock>, booking: BookingConfig) -> Self
    where
        S: UserRepository
            + SessionRepository
            + ListingRepository
            + EventRepository
            + BookingRepository
            + HealthProbe
            + 'static,
    {
        let store = Arc::new(store);
        let users: Arc<dyn UserRepository> = store.clone();
        let listings: Arc<dyn ListingRepository> = store.clone();
        let events: Arc<dyn EventRepository> = store.clone();
        let bookings: Arc<dyn BookingRepository> = store.clone();
        let sessions: Arc<dyn SessionRepository> = store.clone();
        let health: Arc<dyn HealthProbe> = store;

        Self {
            bookings: BookingService::new(
                Arc::clone(&listings),
                bookings,
                Arc::clone(&clock),
                booking.reject_overlaps,
            ),
            listings: ListingService::new(Arc::clone(&users), listings, Arc::clone(&clock)),
            events: EventService::new(events, Arc::clone(&clock)),
            users: UserService::new(users, Arc::clone(&clock)),
            sessions,
            health,
            clock,
        }
    }
}

impl FromRef<AppState> for Arc<dyn HealthProbe> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.health)
    }
}
