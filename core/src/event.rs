//! Events (tournaments, concerts, conventions) and proximity search over
//! the listings linked to them.

use crate::error::DomainError;
use crate::ids::EventId;
use crate::listing::{
    check_latitude, check_longitude, contains_ignore_case, AccommodationType, Listing,
};
use crate::user::HostSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of linked listings fetched for an event
pub const DEFAULT_NEARBY_LIMIT: u32 = 20;

/// Something guests travel to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Free-form tag such as `world_cup` or `concert`
    pub event_type: String,
    /// First day
    pub start_date: DateTime<Utc>,
    /// Last day
    pub end_date: DateTime<Utc>,
    /// City
    pub city: String,
    /// Country
    pub country: String,
    /// Venue latitude
    pub venue_latitude: f64,
    /// Venue longitude
    pub venue_longitude: f64,
    /// Venue name
    pub venue_name: String,
    /// Optional long description
    pub description: Option<String>,
    /// Listed publicly
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /events`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    /// Display name
    pub name: String,
    /// Free-form tag
    pub event_type: String,
    /// First day
    #[serde(deserialize_with = "crate::dates::deserialize")]
    pub start_date: DateTime<Utc>,
    /// Last day
    #[serde(deserialize_with = "crate::dates::deserialize")]
    pub end_date: DateTime<Utc>,
    /// City
    pub city: String,
    /// Country
    pub country: String,
    /// Venue latitude
    pub venue_latitude: f64,
    /// Venue longitude; older clients send `venueLogitude`
    #[serde(alias = "venueLogitude")]
    pub venue_longitude: f64,
    /// Venue name
    pub venue_name: String,
    /// Optional long description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewEvent {
    /// Validate the request and build an active event.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] naming the first offending field.
    pub fn into_event(self, now: DateTime<Utc>) -> Result<Event, DomainError> {
        for (field, value) in [
            ("name", &self.name),
            ("eventType", &self.event_type),
            ("city", &self.city),
            ("country", &self.country),
            ("venueName", &self.venue_name),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::invalid(format!("{field} should not be empty")));
            }
        }
        check_latitude("venueLatitude", self.venue_latitude)?;
        check_longitude("venueLongitude", self.venue_longitude)?;
        if self.start_date > self.end_date {
            return Err(DomainError::invalid("startDate must not be after endDate"));
        }

        Ok(Event {
            id: EventId::new(),
            name: self.name,
            event_type: self.event_type,
            start_date: self.start_date,
            end_date: self.end_date,
            city: self.city,
            country: self.country,
            venue_latitude: self.venue_latitude,
            venue_longitude: self.venue_longitude,
            venue_name: self.venue_name,
            description: self.description,
            is_active: true,
            created_at: now,
        })
    }
}

/// Query string of `GET /events`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    /// Substring of the city, case-insensitive
    pub city: Option<String>,
    /// Substring of the country, case-insensitive
    pub country: Option<String>,
    /// Exact event type
    pub event_type: Option<String>,
    /// Keep events still running on or after this instant
    #[serde(default, deserialize_with = "crate::dates::option::deserialize")]
    pub start_date: Option<DateTime<Utc>>,
    /// Keep events starting on or before this instant
    #[serde(default, deserialize_with = "crate::dates::option::deserialize")]
    pub end_date: Option<DateTime<Utc>>,
    /// Active flag to match
    #[serde(default = "default_active", deserialize_with = "active_flag")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

fn active_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(crate::query::blank_as_none(deserializer)?.unwrap_or(true))
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            city: None,
            country: None,
            event_type: None,
            start_date: None,
            end_date: None,
            is_active: true,
        }
    }
}

impl EventFilter {
    /// Whether `event` satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        event.is_active == self.is_active
            && self
                .city
                .as_deref()
                .filter(|c| !c.is_empty())
                .is_none_or(|c| contains_ignore_case(&event.city, c))
            && self
                .country
                .as_deref()
                .filter(|c| !c.is_empty())
                .is_none_or(|c| contains_ignore_case(&event.country, c))
            && self
                .event_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .is_none_or(|t| event.event_type == t)
            && self.start_date.is_none_or(|from| event.end_date >= from)
            && self.end_date.is_none_or(|until| event.start_date <= until)
    }
}

/// Query string of `GET /events/:id/listings`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    /// Drop listings farther than this from the venue
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub max_distance: Option<f64>,
    /// Exact kind of space
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub accommodation_type: Option<AccommodationType>,
    /// Inclusive upper bound on the nightly rate
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub max_price: Option<f64>,
    /// How many linked listings to fetch
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub limit: Option<i64>,
}

/// Store-side restriction on the linked listings of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedListingFilter {
    /// Exact kind of space
    pub accommodation_type: Option<AccommodationType>,
    /// Inclusive upper bound on the nightly rate
    pub max_price: Option<f64>,
    /// Maximum rows fetched
    pub limit: u32,
}

impl NearbyQuery {
    /// Split into the store filter and the in-memory distance cut-off.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] when `limit < 1`.
    pub fn into_parts(self) -> Result<(LinkedListingFilter, Option<f64>), DomainError> {
        let limit = match self.limit {
            None => DEFAULT_NEARBY_LIMIT,
            Some(l) if l >= 1 => u32::try_from(l.min(i64::from(crate::pagination::MAX_PAGE_SIZE)))
                .unwrap_or(crate::pagination::MAX_PAGE_SIZE),
            Some(_) => {
                return Err(DomainError::invalid("limit must be greater than or equal to 1"));
            }
        };
        Ok((
            LinkedListingFilter {
                accommodation_type: self.accommodation_type,
                max_price: self.max_price,
                limit,
            },
            self.max_distance,
        ))
    }
}

impl LinkedListingFilter {
    /// Whether a linked listing passes the store-side restriction.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        listing.is_active
            && self
                .accommodation_type
                .is_none_or(|t| listing.accommodation_type == t)
            && self.max_price.is_none_or(|p| listing.price_per_night <= p)
    }
}

/// A listing linked to an event, with its precomputed distance to the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyListing {
    /// The listing
    #[serde(flatten)]
    pub listing: Listing,
    /// Host summary
    pub host: HostSummary,
    /// Distance from the venue, when known
    pub distance_to_venue: Option<f64>,
}

impl NearbyListing {
    /// Distance used for filtering and ordering. Unknown distances count as 0.
    #[must_use]
    pub fn effective_distance(&self) -> f64 {
        self.distance_to_venue.unwrap_or(0.0)
    }
}

/// Drop listings beyond `max_distance` and order the rest nearest first.
///
/// The sort is stable, so listings at equal distance keep the order the
/// store returned them in. A listing without a known distance is treated
/// as sitting at the venue.
#[must_use]
pub fn rank_by_distance(
    listings: Vec<NearbyListing>,
    max_distance: Option<f64>,
) -> Vec<NearbyListing> {
    let mut kept: Vec<NearbyListing> = listings
        .into_iter()
        .filter(|l| max_distance.is_none_or(|max| l.effective_distance() <= max))
        .collect();
    kept.sort_by(|a, b| a.effective_distance().total_cmp(&b.effective_distance()));
    kept
}

/// Compact event header in proximity responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Event id
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Venue name
    pub venue_name: String,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            venue_name: event.venue_name.clone(),
        }
    }
}

/// Response of `GET /events/:id/listings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingsNearEvent {
    /// The event
    pub event: EventSummary,
    /// Ranked listings
    pub listings: Vec<NearbyListing>,
}
