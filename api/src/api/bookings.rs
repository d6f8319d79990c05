//! Booking endpoints. All require authentication.

use crate::auth::SessionUser;
use crate::server::AppState;
use axum::{Json, extract::State, http::StatusCode};
use marketplace_core::BookingId;
use marketplace_core::booking::{Booking, BookingDetail, BookingRequest, BookingWithListing};
use marketplace_core::pagination::DataEnvelope;
use marketplace_web::{ApiJson, ApiPath, WebResult};

/// Book a listing as the authenticated guest.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:3001/bookings \
///   -H "Authorization: Bearer <session_token>" \
///   -H "Content-Type: application/json" \
///   -d '{
///     "listingId": "550e8400-e29b-41d4-a716-446655440000",
///     "checkIn": "2024-06-10",
///     "checkOut": "2024-06-14",
///     "numberOfGuests": 2
///   }'
/// ```
pub async fn create_booking(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BookingRequest>,
) -> WebResult<(StatusCode, Json<BookingWithListing>)> {
    let created = state.bookings.create(session.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The caller's bookings, newest first.
pub async fn my_bookings(
    session: SessionUser,
    State(state): State<AppState>,
) -> WebResult<Json<DataEnvelope<BookingWithListing>>> {
    let bookings = state.bookings.find_my_bookings(session.user_id).await?;
    Ok(Json(bookings.into()))
}

/// One booking, visible to its guest and to the listing's host.
pub async fn get_booking(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<BookingId>,
) -> WebResult<Json<BookingDetail>> {
    let detail = state.bookings.find_one(id, session.user_id).await?;
    Ok(Json(detail))
}

/// Cancel one of the caller's bookings.
pub async fn cancel_booking(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<BookingId>,
) -> WebResult<Json<Booking>> {
    let booking = state.bookings.cancel(id, session.user_id).await?;
    Ok(Json(booking))
}
