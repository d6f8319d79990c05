//! Listings: accommodation offered by hosts.

use crate::error::DomainError;
use crate::ids::{ListingId, UserId};
use crate::pagination::PageRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest party a single listing may accommodate
pub const MAX_GUESTS_LIMIT: u32 = 20;

/// Kind of space offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    /// A couch in a shared living room
    Couch,
    /// A shared room
    Shared,
    /// A private room
    Private,
    /// The entire place
    Entire,
}

impl AccommodationType {
    /// Wire and storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Couch => "couch",
            Self::Shared => "shared",
            Self::Private => "private",
            Self::Entire => "entire",
        }
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccommodationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "couch" => Ok(Self::Couch),
            "shared" => Ok(Self::Shared),
            "private" => Ok(Self::Private),
            "entire" => Ok(Self::Entire),
            other => Err(DomainError::invalid(format!(
                "accommodationType must be one of couch, shared, private, entire (got '{other}')"
            ))),
        }
    }
}

/// A place a host offers for booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique identifier
    pub id: ListingId,
    /// Owning host
    pub host_id: UserId,
    /// Headline
    pub title: String,
    /// Long description
    pub description: String,
    /// Kind of space
    pub accommodation_type: AccommodationType,
    /// Nightly rate
    pub price_per_night: f64,
    /// Capacity
    pub max_guests: u32,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// Country
    pub country: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Amenity tags
    pub amenities: Vec<String>,
    /// Image URLs
    pub images: Vec<String>,
    /// Visible in search
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Only the owning host may modify or delete a listing.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Forbidden`] when `user_id` is not the host.
    pub fn ensure_owned_by(&self, user_id: UserId, action: &str) -> Result<(), DomainError> {
        if self.host_id == user_id {
            Ok(())
        } else {
            Err(DomainError::forbidden(format!(
                "You can only {action} your own listings"
            )))
        }
    }
}

/// A listing together with a projection of its host.
///
/// Serialized as the listing's fields plus a `host` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hosted<H> {
    /// The listing
    #[serde(flatten)]
    pub listing: Listing,
    /// Projection of the host
    pub host: H,
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::invalid(format!("{field} should not be empty")))
    } else {
        Ok(())
    }
}

fn check_price(price: f64) -> Result<(), DomainError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(DomainError::invalid("pricePerNight must not be less than 0"))
    }
}

fn check_max_guests(max_guests: i64) -> Result<u32, DomainError> {
    if (1..=i64::from(MAX_GUESTS_LIMIT)).contains(&max_guests) {
        u32::try_from(max_guests).map_err(|_| DomainError::invalid("maxGuests is out of range"))
    } else {
        Err(DomainError::invalid(format!(
            "maxGuests must be between 1 and {MAX_GUESTS_LIMIT}"
        )))
    }
}

pub(crate) fn check_latitude(field: &str, value: f64) -> Result<(), DomainError> {
    if (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::invalid(format!(
            "{field} must be between -90 and 90"
        )))
    }
}

pub(crate) fn check_longitude(field: &str, value: f64) -> Result<(), DomainError> {
    if (-180.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::invalid(format!(
            "{field} must be between -180 and 180"
        )))
    }
}

/// Body of `POST /listings`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    /// Headline
    pub title: String,
    /// Long description
    pub description: String,
    /// Kind of space
    pub accommodation_type: AccommodationType,
    /// Nightly rate
    pub price_per_night: f64,
    /// Capacity
    pub max_guests: i64,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// Country
    pub country: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Amenity tags
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewListing {
    /// Validate the request and build the listing owned by `host_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] naming the first offending field.
    pub fn into_listing(self, host_id: UserId, now: DateTime<Utc>) -> Result<Listing, DomainError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("address", &self.address)?;
        require_text("city", &self.city)?;
        require_text("country", &self.country)?;
        check_price(self.price_per_night)?;
        let max_guests = check_max_guests(self.max_guests)?;
        check_latitude("latitude", self.latitude)?;
        check_longitude("longitude", self.longitude)?;

        Ok(Listing {
            id: ListingId::new(),
            host_id,
            title: self.title,
            description: self.description,
            accommodation_type: self.accommodation_type,
            price_per_night: self.price_per_night,
            max_guests,
            address: self.address,
            city: self.city,
            country: self.country,
            latitude: self.latitude,
            longitude: self.longitude,
            amenities: self.amenities,
            images: self.images,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Body of `PATCH /listings/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingChanges {
    /// New headline
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New kind of space
    pub accommodation_type: Option<AccommodationType>,
    /// New nightly rate
    pub price_per_night: Option<f64>,
    /// New capacity
    pub max_guests: Option<i64>,
    /// New street address
    pub address: Option<String>,
    /// New city
    pub city: Option<String>,
    /// New country
    pub country: Option<String>,
    /// New latitude
    pub latitude: Option<f64>,
    /// New longitude
    pub longitude: Option<f64>,
    /// Replacement amenity tags
    pub amenities: Option<Vec<String>>,
    /// Replacement image URLs
    pub images: Option<Vec<String>>,
    /// Show or hide in search
    pub is_active: Option<bool>,
}

impl ListingChanges {
    /// Apply the creation bounds to every provided field.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] naming the first offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let texts = [
            ("title", &self.title),
            ("description", &self.description),
            ("address", &self.address),
            ("city", &self.city),
            ("country", &self.country),
        ];
        for (field, value) in texts {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }
        if let Some(price) = self.price_per_night {
            check_price(price)?;
        }
        if let Some(max_guests) = self.max_guests {
            check_max_guests(max_guests)?;
        }
        if let Some(latitude) = self.latitude {
            check_latitude("latitude", latitude)?;
        }
        if let Some(longitude) = self.longitude {
            check_longitude("longitude", longitude)?;
        }
        Ok(())
    }

    /// Validate and apply onto `listing`, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] if validation fails; the
    /// listing is left unchanged in that case.
    pub fn apply(&self, listing: &mut Listing, updated_at: DateTime<Utc>) -> Result<(), DomainError> {
        self.validate()?;

        if let Some(v) = &self.title {
            listing.title.clone_from(v);
        }
        if let Some(v) = &self.description {
            listing.description.clone_from(v);
        }
        if let Some(v) = self.accommodation_type {
            listing.accommodation_type = v;
        }
        if let Some(v) = self.price_per_night {
            listing.price_per_night = v;
        }
        if let Some(v) = self.max_guests {
            listing.max_guests = check_max_guests(v)?;
        }
        if let Some(v) = &self.address {
            listing.address.clone_from(v);
        }
        if let Some(v) = &self.city {
            listing.city.clone_from(v);
        }
        if let Some(v) = &self.country {
            listing.country.clone_from(v);
        }
        if let Some(v) = self.latitude {
            listing.latitude = v;
        }
        if let Some(v) = self.longitude {
            listing.longitude = v;
        }
        if let Some(v) = &self.amenities {
            listing.amenities.clone_from(v);
        }
        if let Some(v) = &self.images {
            listing.images.clone_from(v);
        }
        if let Some(v) = self.is_active {
            listing.is_active = v;
        }
        listing.updated_at = updated_at;
        Ok(())
    }
}

/// Query string of `GET /listings`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSearch {
    /// Substring of the city, case-insensitive
    pub city: Option<String>,
    /// Substring of the country, case-insensitive
    pub country: Option<String>,
    /// Exact kind of space
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub accommodation_type: Option<AccommodationType>,
    /// Inclusive lower bound on the nightly rate
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub min_price: Option<f64>,
    /// Inclusive upper bound on the nightly rate
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub max_price: Option<f64>,
    /// Party size the listing must hold
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub max_guests: Option<i64>,
    /// 1-based page
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub page: Option<i64>,
    /// Page size
    #[serde(default, deserialize_with = "crate::query::blank_as_none")]
    pub limit: Option<i64>,
}

impl ListingSearch {
    /// Split into the row filter and the validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] for an invalid page or limit.
    pub fn into_parts(self) -> Result<(ListingFilter, PageRequest), DomainError> {
        let page = PageRequest::new(self.page, self.limit)?;
        let filter = ListingFilter {
            city: self.city.filter(|s| !s.is_empty()),
            country: self.country.filter(|s| !s.is_empty()),
            accommodation_type: self.accommodation_type,
            min_price: self.min_price,
            max_price: self.max_price,
            max_guests: self.max_guests,
        };
        Ok((filter, page))
    }
}

/// Row filter for listing search. Only active listings ever match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    /// Substring of the city, case-insensitive
    pub city: Option<String>,
    /// Substring of the country, case-insensitive
    pub country: Option<String>,
    /// Exact kind of space
    pub accommodation_type: Option<AccommodationType>,
    /// Inclusive lower bound on the nightly rate
    pub min_price: Option<f64>,
    /// Inclusive upper bound on the nightly rate
    pub max_price: Option<f64>,
    /// Listings must hold at least this many guests
    pub max_guests: Option<i64>,
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ListingFilter {
    /// Whether `listing` satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        listing.is_active
            && self
                .city
                .as_deref()
                .is_none_or(|c| contains_ignore_case(&listing.city, c))
            && self
                .country
                .as_deref()
                .is_none_or(|c| contains_ignore_case(&listing.country, c))
            && self
                .accommodation_type
                .is_none_or(|t| listing.accommodation_type == t)
            && self.min_price.is_none_or(|p| listing.price_per_night >= p)
            && self.max_price.is_none_or(|p| listing.price_per_night <= p)
            && self
                .max_guests
                .is_none_or(|g| i64::from(listing.max_guests) >= g)
    }
}
