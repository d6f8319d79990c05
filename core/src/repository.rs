//! Storage abstractions.
//!
//! Services depend on these traits only. `marketplace-postgres` implements
//! them on `sqlx`, `marketplace-testing` implements them in memory.

use crate::booking::{Booking, BookingDetail, BookingStatus, BookingWithListing};
use crate::error::StoreError;
use crate::event::{Event, EventFilter, LinkedListingFilter, NearbyListing};
use crate::ids::{BookingId, EventId, ListingId, UserId};
use crate::listing::{Hosted, Listing, ListingFilter};
use crate::pagination::PageRequest;
use crate::user::{HostSummary, ProfileChanges, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result type for repository operations
pub type StoreResult<T> = Result<T, StoreError>;

/// User profiles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Apply profile changes; returns the updated user, or `None` if absent.
    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<User>>;
}

/// Bearer sessions issued by the external auth service.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Resolve a hashed token to its user if the session has not expired at `now`.
    async fn find_user_by_token_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<UserId>>;
}

/// Listings.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a new listing.
    async fn insert(&self, listing: &Listing) -> StoreResult<()>;

    /// Load a listing by id, active or not.
    async fn find_by_id(&self, id: ListingId) -> StoreResult<Option<Listing>>;

    /// One page of matching listings, newest first, plus the total match count.
    async fn search(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> StoreResult<(Vec<Hosted<HostSummary>>, u64)>;

    /// Every listing of a host, newest first.
    async fn find_by_host(&self, host_id: UserId) -> StoreResult<Vec<Listing>>;

    /// Overwrite a listing's mutable fields; returns whether the row still
    /// existed.
    async fn update(&self, listing: &Listing) -> StoreResult<bool>;

    /// Hard-delete; returns whether a row was removed.
    async fn delete(&self, id: ListingId) -> StoreResult<bool>;
}

/// Events and their precomputed listing links.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event.
    async fn insert(&self, event: &Event) -> StoreResult<()>;

    /// Load an event by id.
    async fn find_by_id(&self, id: EventId) -> StoreResult<Option<Event>>;

    /// Matching events ordered by start date ascending.
    async fn search(&self, filter: &EventFilter) -> StoreResult<Vec<Event>>;

    /// Listings linked to an event, restricted by `filter`, at most
    /// `filter.limit` rows, in store order.
    async fn linked_listings(
        &self,
        event_id: EventId,
        filter: &LinkedListingFilter,
    ) -> StoreResult<Vec<NearbyListing>>;
}

/// Bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking.
    async fn insert(&self, booking: &Booking) -> StoreResult<()>;

    /// Load a booking by id.
    async fn find_by_id(&self, id: BookingId) -> StoreResult<Option<Booking>>;

    /// Load a booking with the full listing and both contact cards.
    async fn find_detail(&self, id: BookingId) -> StoreResult<Option<BookingDetail>>;

    /// Every booking of a guest, newest first, with listing summary and host badge.
    async fn find_by_guest(&self, guest_id: UserId) -> StoreResult<Vec<BookingWithListing>>;

    /// Non-cancelled bookings of a listing that intersect `[check_in, check_out)`.
    async fn count_overlapping(
        &self,
        listing_id: ListingId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> StoreResult<u64>;

    /// Set the status; returns the updated booking, or `None` if absent.
    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Booking>>;
}

/// Readiness probe for a backing component.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Component name reported in readiness output
    fn component(&self) -> &'static str;

    /// Succeeds when the component can serve requests.
    async fn check(&self) -> StoreResult<()>;
}
