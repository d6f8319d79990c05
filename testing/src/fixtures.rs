//! Test data.
//!
//! Every fixture is valid and timestamped at [`epoch`], the time returned
//! by [`crate::test_clock`]. Adjust fields with struct update syntax.

use chrono::{DateTime, Duration, TimeZone, Utc};
use marketplace_core::event::Event;
use marketplace_core::ids::{EventId, ListingId, UserId};
use marketplace_core::listing::{AccommodationType, Listing, NewListing};
use marketplace_core::user::User;

/// 2025-01-01 00:00:00 UTC
#[must_use]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// A verified, non-host user with the given email.
#[must_use]
pub fn user(email: &str) -> User {
    let first_name = email.split('@').next().unwrap_or(email);
    User {
        id: UserId::new(),
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        phone: Some("+1 555 0100".to_string()),
        bio: None,
        avatar_url: None,
        is_verified: true,
        is_host: false,
        reputation_score: 4.8,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// A valid listing request: a private room for two at 100 per night.
#[must_use]
pub fn new_listing() -> NewListing {
    NewListing {
        title: "Private room near the stadium".to_string(),
        description: "Quiet room, ten minutes walk from the venue".to_string(),
        accommodation_type: AccommodationType::Private,
        price_per_night: 100.0,
        max_guests: 2,
        address: "1 Main Street".to_string(),
        city: "Lisbon".to_string(),
        country: "Portugal".to_string(),
        latitude: 38.72,
        longitude: -9.14,
        amenities: vec!["wifi".to_string(), "kitchen".to_string()],
        images: vec!["https://images.example.com/room.jpg".to_string()],
    }
}

/// An active listing owned by `host`, built from [`new_listing`].
#[must_use]
pub fn listing_for(host: &User) -> Listing {
    let req = new_listing();
    Listing {
        id: ListingId::new(),
        host_id: host.id,
        title: req.title,
        description: req.description,
        accommodation_type: req.accommodation_type,
        price_per_night: req.price_per_night,
        max_guests: 2,
        address: req.address,
        city: req.city,
        country: req.country,
        latitude: req.latitude,
        longitude: req.longitude,
        amenities: req.amenities,
        images: req.images,
        is_active: true,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// An active week-long event starting 30 days after [`epoch`].
#[must_use]
pub fn event(name: &str) -> Event {
    let start = epoch() + Duration::days(30);
    Event {
        id: EventId::new(),
        name: name.to_string(),
        event_type: "concert".to_string(),
        start_date: start,
        end_date: start + Duration::days(7),
        city: "Lisbon".to_string(),
        country: "Portugal".to_string(),
        venue_latitude: 38.75,
        venue_longitude: -9.18,
        venue_name: "Estadio da Luz".to_string(),
        description: None,
        is_active: true,
        created_at: epoch(),
    }
}
