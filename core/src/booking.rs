//! Bookings: a guest's stay at a listing.
//!
//! Pricing is `nights * pricePerNight`, where `nights` is the ceiling of
//! the stay length in days measured on the millisecond difference. A
//! booking is created `pending` and the only transition implemented here
//! is `pending -> cancelled` by the guest.

use crate::error::DomainError;
use crate::ids::{BookingId, ListingId, UserId};
use crate::listing::{Hosted, Listing};
use crate::user::{ContactCard, HostBadge};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Requested, awaiting host action
    Pending,
    /// Accepted by the host
    Confirmed,
    /// Cancelled by the guest
    Cancelled,
    /// Stay finished
    Completed,
}

impl BookingStatus {
    /// Wire and storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(DomainError::invalid(format!("unknown booking status '{other}'"))),
        }
    }
}

/// A stay reserved by a guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Listing being booked
    pub listing_id: ListingId,
    /// Guest who booked
    pub guest_id: UserId,
    /// Arrival
    pub check_in: DateTime<Utc>,
    /// Departure
    pub check_out: DateTime<Utc>,
    /// Party size
    pub number_of_guests: u32,
    /// `nights * pricePerNight` at booking time
    pub total_price: f64,
    /// Lifecycle state
    pub status: BookingStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Only the guest or the listing's host may see a booking.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Forbidden`] for anyone else.
    pub fn ensure_visible_to(&self, user_id: UserId, host_id: UserId) -> Result<(), DomainError> {
        if self.guest_id == user_id || host_id == user_id {
            Ok(())
        } else {
            Err(DomainError::forbidden("You do not have access to this booking"))
        }
    }

    /// Only the guest may cancel, and only once.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Forbidden`] when `user_id` is not the guest and
    /// [`DomainError::InvalidArgument`] when the booking is already cancelled.
    pub fn ensure_cancellable_by(&self, user_id: UserId) -> Result<(), DomainError> {
        if self.guest_id != user_id {
            return Err(DomainError::forbidden("You can only cancel your own bookings"));
        }
        if self.status == BookingStatus::Cancelled {
            return Err(DomainError::invalid("Booking is already cancelled"));
        }
        Ok(())
    }

    /// Whether this booking blocks `[check_in, check_out)` on its listing.
    #[must_use]
    pub fn overlaps(&self, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> bool {
        self.status != BookingStatus::Cancelled
            && self.check_in < check_out
            && check_in < self.check_out
    }
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Listing to book
    pub listing_id: ListingId,
    /// Arrival
    #[serde(deserialize_with = "crate::dates::deserialize")]
    pub check_in: DateTime<Utc>,
    /// Departure
    #[serde(deserialize_with = "crate::dates::deserialize")]
    pub check_out: DateTime<Utc>,
    /// Party size
    pub number_of_guests: i64,
}

/// Validated guest count, stay length and price for a booking request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingQuote {
    /// Party size
    pub number_of_guests: u32,
    /// Billable nights
    pub nights: i64,
    /// `nights * pricePerNight`
    pub total_price: f64,
}

/// Billable nights between two instants: the millisecond difference divided
/// by one day, rounded up.
#[must_use]
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let millis = (check_out - check_in).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) != 0)
}

/// Check a request against the listing and price the stay.
///
/// Guest capacity is checked before the date range.
///
/// # Errors
///
/// Returns [`DomainError::InvalidArgument`] when the party is empty or larger
/// than the listing allows, or when `checkOut` is not at least one
/// millisecond after `checkIn`.
pub fn quote(listing: &Listing, request: &BookingRequest) -> Result<BookingQuote, DomainError> {
    if request.number_of_guests < 1 {
        return Err(DomainError::invalid("numberOfGuests must not be less than 1"));
    }
    if request.number_of_guests > i64::from(listing.max_guests) {
        return Err(DomainError::invalid(format!(
            "Listing can accommodate maximum {} guests",
            listing.max_guests
        )));
    }
    // Compared at millisecond resolution, the same as the night count.
    let nights = nights_between(request.check_in, request.check_out);
    if nights < 1 {
        return Err(DomainError::invalid("Check-out date must be after check-in date"));
    }

    #[allow(clippy::cast_precision_loss)]
    let total_price = nights as f64 * listing.price_per_night;
    let number_of_guests = u32::try_from(request.number_of_guests)
        .map_err(|_| DomainError::invalid("numberOfGuests is out of range"))?;

    Ok(BookingQuote {
        number_of_guests,
        nights,
        total_price,
    })
}

/// Listing fields shown with a booking in guest-facing lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
    /// Listing id
    pub id: ListingId,
    /// Headline
    pub title: String,
    /// City
    pub city: String,
    /// Country
    pub country: String,
    /// Image URLs
    pub images: Vec<String>,
    /// Host card, present in booking lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<HostBadge>,
}

impl ListingSummary {
    /// Summary without a host card.
    #[must_use]
    pub fn of(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title.clone(),
            city: listing.city.clone(),
            country: listing.country.clone(),
            images: listing.images.clone(),
            host: None,
        }
    }
}

/// A booking with a summary of its listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWithListing {
    /// The booking
    #[serde(flatten)]
    pub booking: Booking,
    /// Listing summary
    pub listing: ListingSummary,
}

/// A booking with both parties' contact details, as seen by guest or host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDetail {
    /// The booking
    #[serde(flatten)]
    pub booking: Booking,
    /// Full listing with the host's contact card
    pub listing: Hosted<ContactCard>,
    /// The guest's contact card
    pub guest: ContactCard,
}
