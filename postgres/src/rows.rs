//! Row to domain conversions shared by the repositories.

use marketplace_core::booking::{Booking, BookingStatus};
use marketplace_core::event::Event;
use marketplace_core::ids::{BookingId, EventId, ListingId, UserId};
use marketplace_core::listing::{AccommodationType, Listing};
use marketplace_core::repository::StoreResult;
use marketplace_core::user::{ContactCard, HostSummary, User};
use marketplace_core::StoreError;
use sqlx::postgres::PgRow;
use sqlx::{Decode, Postgres, Row, Type};

/// Listing columns in the order expected by [`listing`], read from alias `l`.
macro_rules! listing_columns {
    () => {
        "l.id, l.host_id, l.title, l.description, l.accommodation_type, \
         l.price_per_night, l.max_guests, l.address, l.city, l.country, \
         l.latitude, l.longitude, l.amenities, l.images, l.is_active, \
         l.created_at, l.updated_at"
    };
}

/// User columns expected by [`user`].
macro_rules! user_columns {
    () => {
        "id, email, first_name, last_name, phone, bio, avatar_url, is_verified, \
         is_host, reputation_score, created_at, updated_at"
    };
}

/// Booking columns expected by [`booking`], read from alias `b`.
macro_rules! booking_columns {
    () => {
        "b.id, b.listing_id, b.guest_id, b.check_in, b.check_out, \
         b.number_of_guests, b.total_price, b.status, b.created_at, b.updated_at"
    };
}

/// Event columns expected by [`event`].
macro_rules! event_columns {
    () => {
        "id, name, event_type, start_date, end_date, city, country, \
         venue_latitude, venue_longitude, venue_name, description, is_active, \
         created_at"
    };
}

pub(crate) use {booking_columns, event_columns, listing_columns, user_columns};

fn col<'r, T>(row: &'r PgRow, name: &str) -> StoreResult<T>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| StoreError::Serialization(format!("column {name}: {e}")))
}

fn to_u32(name: &str, value: i32) -> StoreResult<u32> {
    u32::try_from(value).map_err(|_| StoreError::Serialization(format!("negative {name}: {value}")))
}

pub(crate) fn listing(row: &PgRow) -> StoreResult<Listing> {
    let accommodation_type: String = col(row, "accommodation_type")?;
    let accommodation_type = accommodation_type
        .parse::<AccommodationType>()
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    Ok(Listing {
        id: ListingId::from_uuid(col(row, "id")?),
        host_id: UserId::from_uuid(col(row, "host_id")?),
        title: col(row, "title")?,
        description: col(row, "description")?,
        accommodation_type,
        price_per_night: col(row, "price_per_night")?,
        max_guests: to_u32("max_guests", col(row, "max_guests")?)?,
        address: col(row, "address")?,
        city: col(row, "city")?,
        country: col(row, "country")?,
        latitude: col(row, "latitude")?,
        longitude: col(row, "longitude")?,
        amenities: col(row, "amenities")?,
        images: col(row, "images")?,
        is_active: col(row, "is_active")?,
        created_at: col(row, "created_at")?,
        updated_at: col(row, "updated_at")?,
    })
}

/// Host summary from `host_*` aliased columns.
pub(crate) fn host_summary(row: &PgRow) -> StoreResult<HostSummary> {
    Ok(HostSummary {
        id: UserId::from_uuid(col(row, "host_id")?),
        first_name: col(row, "host_first_name")?,
        last_name: col(row, "host_last_name")?,
        avatar_url: col(row, "host_avatar_url")?,
        reputation_score: col(row, "host_reputation_score")?,
    })
}

/// Host contact card from `host_*` aliased columns.
pub(crate) fn host_contact(row: &PgRow) -> StoreResult<ContactCard> {
    Ok(ContactCard {
        id: UserId::from_uuid(col(row, "host_id")?),
        first_name: col(row, "host_first_name")?,
        last_name: col(row, "host_last_name")?,
        phone: col(row, "host_phone")?,
        email: col(row, "host_email")?,
        avatar_url: col(row, "host_avatar_url")?,
    })
}

pub(crate) fn user(row: &PgRow) -> StoreResult<User> {
    Ok(User {
        id: UserId::from_uuid(col(row, "id")?),
        email: col(row, "email")?,
        first_name: col(row, "first_name")?,
        last_name: col(row, "last_name")?,
        phone: col(row, "phone")?,
        bio: col(row, "bio")?,
        avatar_url: col(row, "avatar_url")?,
        is_verified: col(row, "is_verified")?,
        is_host: col(row, "is_host")?,
        reputation_score: col(row, "reputation_score")?,
        created_at: col(row, "created_at")?,
        updated_at: col(row, "updated_at")?,
    })
}

pub(crate) fn event(row: &PgRow) -> StoreResult<Event> {
    Ok(Event {
        id: EventId::from_uuid(col(row, "id")?),
        name: col(row, "name")?,
        event_type: col(row, "event_type")?,
        start_date: col(row, "start_date")?,
        end_date: col(row, "end_date")?,
        city: col(row, "city")?,
        country: col(row, "country")?,
        venue_latitude: col(row, "venue_latitude")?,
        venue_longitude: col(row, "venue_longitude")?,
        venue_name: col(row, "venue_name")?,
        description: col(row, "description")?,
        is_active: col(row, "is_active")?,
        created_at: col(row, "created_at")?,
    })
}

pub(crate) fn booking(row: &PgRow) -> StoreResult<Booking> {
    let status: String = col(row, "status")?;
    let status = status
        .parse::<BookingStatus>()
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    Ok(Booking {
        id: BookingId::from_uuid(col(row, "id")?),
        listing_id: ListingId::from_uuid(col(row, "listing_id")?),
        guest_id: UserId::from_uuid(col(row, "guest_id")?),
        check_in: col(row, "check_in")?,
        check_out: col(row, "check_out")?,
        number_of_guests: to_u32("number_of_guests", col(row, "number_of_guests")?)?,
        total_price: col(row, "total_price")?,
        status,
        created_at: col(row, "created_at")?,
        updated_at: col(row, "updated_at")?,
    })
}

pub(crate) fn count(row: &PgRow) -> StoreResult<u64> {
    let n: i64 = col(row, "count")?;
    u64::try_from(n).map_err(|_| StoreError::Serialization(format!("negative count: {n}")))
}

/// Non-negative `u32` as a Postgres `INTEGER` bind value.
pub(crate) fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Escape LIKE wildcards in user input and wrap it for substring matching.
pub(crate) fn contains_pattern(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(|s| {
        let escaped = s
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(contains_pattern(Some("50%_off")).as_deref(), Some("%50\\%\\_off%"));
        assert_eq!(contains_pattern(Some("")), None);
        assert_eq!(contains_pattern(None), None);
    }
}
