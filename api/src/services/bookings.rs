//! Booking service: create, list, inspect and cancel stays.

use crate::metrics;
use marketplace_core::booking::{
    self, Booking, BookingDetail, BookingRequest, BookingStatus, BookingWithListing,
    ListingSummary,
};
use marketplace_core::environment::Clock;
use marketplace_core::error::DomainResult;
use marketplace_core::repository::{BookingRepository, ListingRepository};
use marketplace_core::{BookingId, DomainError, UserId};
use std::sync::Arc;

/// Booking operations.
#[derive(Clone)]
pub struct BookingService {
    listings: Arc<dyn ListingRepository>,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    reject_overlaps: bool,
}

impl BookingService {
    /// Create a booking service.
    ///
    /// With `reject_overlaps` set, a booking whose dates overlap a live
    /// booking of the same listing is refused with a conflict.
    #[must_use]
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        reject_overlaps: bool,
    ) -> Self {
        Self {
            listings,
            bookings,
            clock,
            reject_overlaps,
        }
    }

    /// Book a listing for `guest_id`. The booking starts out `pending`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NotFound`] when the listing does not exist
    /// - [`DomainError::InvalidArgument`] for a bad party size or date range
    /// - [`DomainError::Conflict`] for overlapping dates, when enabled
    #[tracing::instrument(skip(self, request), fields(listing_id = %request.listing_id))]
    pub async fn create(
        &self,
        guest_id: UserId,
        request: BookingRequest,
    ) -> DomainResult<BookingWithListing> {
        let listing = self
            .listings
            .find_by_id(request.listing_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing", request.listing_id))?;

        let quote = booking::quote(&listing, &request)?;

        if self.reject_overlaps {
            let overlapping = self
                .bookings
                .count_overlapping(listing.id, request.check_in, request.check_out)
                .await?;
            if overlapping > 0 {
                tracing::debug!(overlapping, "Rejected overlapping booking");
                return Err(DomainError::Conflict(
                    "Listing is already booked for the selected dates".to_string(),
                ));
            }
        }

        let now = self.clock.now();
        let booking = Booking {
            id: BookingId::new(),
            listing_id: listing.id,
            guest_id,
            check_in: request.check_in,
            check_out: request.check_out,
            number_of_guests: quote.number_of_guests,
            total_price: quote.total_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.bookings.insert(&booking).await?;

        metrics::record_booking_created(quote.nights);
        tracing::info!(
            booking_id = %booking.id,
            nights = quote.nights,
            total_price = booking.total_price,
            "Booking created"
        );

        Ok(BookingWithListing {
            booking,
            listing: ListingSummary::of(&listing),
        })
    }

    /// Every booking of `guest_id`, newest first.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    #[tracing::instrument(skip(self))]
    pub async fn find_my_bookings(&self, guest_id: UserId) -> DomainResult<Vec<BookingWithListing>> {
        Ok(self.bookings.find_by_guest(guest_id).await?)
    }

    /// A booking with listing, host and guest contact details.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NotFound`] when the booking does not exist
    /// - [`DomainError::Forbidden`] unless `user_id` is the guest or the host
    #[tracing::instrument(skip(self))]
    pub async fn find_one(&self, id: BookingId, user_id: UserId) -> DomainResult<BookingDetail> {
        let detail = self
            .bookings
            .find_detail(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        detail
            .booking
            .ensure_visible_to(user_id, detail.listing.listing.host_id)?;
        Ok(detail)
    }

    /// Cancel a booking on behalf of its guest.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NotFound`] when the booking does not exist
    /// - [`DomainError::Forbidden`] unless `user_id` is the guest
    /// - [`DomainError::InvalidArgument`] when already cancelled
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, id: BookingId, user_id: UserId) -> DomainResult<Booking> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        booking.ensure_cancellable_by(user_id)?;

        let cancelled = self
            .bookings
            .update_status(id, BookingStatus::Cancelled, self.clock.now())
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        metrics::record_booking_cancelled();
        tracing::info!(booking_id = %id, "Booking cancelled");
        Ok(cancelled)
    }
}
