//! In-memory implementation of every repository trait.
//!
//! One [`InMemoryMarketplace`] holds all tables behind a single lock so the
//! joins (listing + host, booking + listing + guest) see a consistent view.
//! Clones share the same tables.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marketplace_core::booking::{
    Booking, BookingDetail, BookingStatus, BookingWithListing, ListingSummary,
};
use marketplace_core::event::{Event, EventFilter, LinkedListingFilter, NearbyListing};
use marketplace_core::ids::{BookingId, EventId, ListingId, UserId};
use marketplace_core::listing::{Hosted, Listing, ListingFilter};
use marketplace_core::pagination::PageRequest;
use marketplace_core::repository::{
    BookingRepository, EventRepository, HealthProbe, ListingRepository, SessionRepository,
    StoreResult, UserRepository,
};
use marketplace_core::session::hash_token;
use marketplace_core::user::{HostSummary, ProfileChanges, User};
use marketplace_core::StoreError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    sessions: HashMap<String, (UserId, DateTime<Utc>)>,
    listings: Vec<Listing>,
    events: Vec<Event>,
    event_listings: Vec<(EventId, ListingId, Option<f64>)>,
    bookings: Vec<Booking>,
}

impl Tables {
    fn listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }
}

/// Newest first; among equal timestamps the most recently inserted wins.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    out
}

/// HashMap-backed marketplace storage for fast, deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketplace {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<RwLock<bool>>,
}

impl InMemoryMarketplace {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user and return it.
    pub fn insert_user(&self, user: User) -> User {
        self.tables
            .write()
            .unwrap()
            .users
            .insert(user.id, user.clone());
        user
    }

    /// Seed a session for a raw bearer token.
    pub fn insert_session(&self, token: &str, user_id: UserId, expires_at: DateTime<Utc>) {
        self.tables
            .write()
            .unwrap()
            .sessions
            .insert(hash_token(token), (user_id, expires_at));
    }

    /// Seed a listing directly, bypassing validation.
    pub fn insert_listing(&self, listing: Listing) -> Listing {
        self.tables.write().unwrap().listings.push(listing.clone());
        listing
    }

    /// Seed an event directly.
    pub fn insert_event(&self, event: Event) -> Event {
        self.tables.write().unwrap().events.push(event.clone());
        event
    }

    /// Link a listing to an event with a precomputed distance.
    pub fn link_listing(&self, event_id: EventId, listing_id: ListingId, distance: Option<f64>) {
        self.tables
            .write()
            .unwrap()
            .event_listings
            .push((event_id, listing_id, distance));
    }

    /// Seed a booking directly.
    pub fn insert_booking(&self, booking: Booking) -> Booking {
        self.tables.write().unwrap().bookings.push(booking.clone());
        booking
    }

    /// Number of stored bookings
    #[must_use]
    pub fn booking_count(&self) -> usize {
        self.tables.read().unwrap().bookings.len()
    }

    /// Make the health probe fail until called again with `false`.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().unwrap() = unavailable;
    }
}

#[async_trait]
impl UserRepository for InMemoryMarketplace {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().unwrap().users.get(&id).cloned())
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().unwrap();
        Ok(tables.users.get_mut(&id).map(|user| {
            changes.apply(user, updated_at);
            user.clone()
        }))
    }
}

#[async_trait]
impl SessionRepository for InMemoryMarketplace {
    async fn find_user_by_token_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<UserId>> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .sessions
            .get(token_hash)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(user_id, _)| *user_id))
    }
}

#[async_trait]
impl ListingRepository for InMemoryMarketplace {
    async fn insert(&self, listing: &Listing) -> StoreResult<()> {
        let mut tables = self.tables.write().unwrap();
        if !tables.users.contains_key(&listing.host_id) {
            return Err(StoreError::Database(format!(
                "host {} does not exist",
                listing.host_id
            )));
        }
        tables.listings.push(listing.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ListingId) -> StoreResult<Option<Listing>> {
        Ok(self.tables.read().unwrap().listing(id).cloned())
    }

    async fn search(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> StoreResult<(Vec<Hosted<HostSummary>>, u64)> {
        let tables = self.tables.read().unwrap();
        let matching: Vec<Hosted<HostSummary>> = newest_first(&tables.listings, |l| l.created_at)
            .into_iter()
            .filter(|l| filter.matches(l))
            .filter_map(|listing| {
                let host = tables.users.get(&listing.host_id)?.host_summary();
                Some(Hosted { listing, host })
            })
            .collect();

        let total = matching.len() as u64;
        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let rows = matching
            .into_iter()
            .skip(skip)
            .take(page.limit() as usize)
            .collect();
        Ok((rows, total))
    }

    async fn find_by_host(&self, host_id: UserId) -> StoreResult<Vec<Listing>> {
        let tables = self.tables.read().unwrap();
        Ok(newest_first(&tables.listings, |l| l.created_at)
            .into_iter()
            .filter(|l| l.host_id == host_id)
            .collect())
    }

    async fn update(&self, listing: &Listing) -> StoreResult<bool> {
        let mut tables = self.tables.write().unwrap();
        let Some(stored) = tables.listings.iter_mut().find(|l| l.id == listing.id) else {
            return Ok(false);
        };
        *stored = listing.clone();
        Ok(true)
    }

    async fn delete(&self, id: ListingId) -> StoreResult<bool> {
        let mut tables = self.tables.write().unwrap();
        let before = tables.listings.len();
        tables.listings.retain(|l| l.id != id);
        tables.event_listings.retain(|(_, listing_id, _)| *listing_id != id);
        tables.bookings.retain(|b| b.listing_id != id);
        Ok(tables.listings.len() < before)
    }
}

#[async_trait]
impl EventRepository for InMemoryMarketplace {
    async fn insert(&self, event: &Event) -> StoreResult<()> {
        self.tables.write().unwrap().events.push(event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EventId) -> StoreResult<Option<Event>> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn search(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .tables
            .read()
            .unwrap()
            .events
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_date);
        Ok(events)
    }

    async fn linked_listings(
        &self,
        event_id: EventId,
        filter: &LinkedListingFilter,
    ) -> StoreResult<Vec<NearbyListing>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .event_listings
            .iter()
            .filter(|(e, _, _)| *e == event_id)
            .filter_map(|(_, listing_id, distance)| {
                let listing = tables.listing(*listing_id)?;
                if !filter.matches(listing) {
                    return None;
                }
                let host = tables.users.get(&listing.host_id)?.host_summary();
                Some(NearbyListing {
                    listing: listing.clone(),
                    host,
                    distance_to_venue: *distance,
                })
            })
            .take(filter.limit as usize)
            .collect())
    }
}

#[async_trait]
impl BookingRepository for InMemoryMarketplace {
    async fn insert(&self, booking: &Booking) -> StoreResult<()> {
        let mut tables = self.tables.write().unwrap();
        if tables.listing(booking.listing_id).is_none() {
            return Err(StoreError::Database(format!(
                "listing {} does not exist",
                booking.listing_id
            )));
        }
        tables.bookings.push(booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BookingId) -> StoreResult<Option<Booking>> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn find_detail(&self, id: BookingId) -> StoreResult<Option<BookingDetail>> {
        let tables = self.tables.read().unwrap();
        let Some(booking) = tables.bookings.iter().find(|b| b.id == id) else {
            return Ok(None);
        };
        let detail = tables.listing(booking.listing_id).and_then(|listing| {
            let host = tables.users.get(&listing.host_id)?;
            let guest = tables.users.get(&booking.guest_id)?;
            Some(BookingDetail {
                booking: booking.clone(),
                listing: Hosted {
                    listing: listing.clone(),
                    host: host.contact_card(),
                },
                guest: guest.contact_card(),
            })
        });
        Ok(detail)
    }

    async fn find_by_guest(&self, guest_id: UserId) -> StoreResult<Vec<BookingWithListing>> {
        let tables = self.tables.read().unwrap();
        Ok(newest_first(&tables.bookings, |b| b.created_at)
            .into_iter()
            .filter(|b| b.guest_id == guest_id)
            .filter_map(|booking| {
                let listing = tables.listing(booking.listing_id)?;
                let mut summary = ListingSummary::of(listing);
                summary.host = tables.users.get(&listing.host_id).map(User::host_badge);
                Some(BookingWithListing {
                    booking,
                    listing: summary,
                })
            })
            .collect())
    }

    async fn count_overlapping(
        &self,
        listing_id: ListingId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> StoreResult<u64> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .bookings
            .iter()
            .filter(|b| b.listing_id == listing_id && b.overlaps(check_in, check_out))
            .count() as u64)
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Booking>> {
        let mut tables = self.tables.write().unwrap();
        Ok(tables.bookings.iter_mut().find(|b| b.id == id).map(|b| {
            b.status = status;
            b.updated_at = updated_at;
            b.clone()
        }))
    }
}

#[async_trait]
impl HealthProbe for InMemoryMarketplace {
    fn component(&self) -> &'static str {
        "in-memory"
    }

    async fn check(&self) -> StoreResult<()> {
        if *self.unavailable.read().unwrap() {
            Err(StoreError::Database("store marked unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}
