//! Event endpoints.

use crate::auth::SessionUser;
use crate::server::AppState;
use axum::{Json, extract::State, http::StatusCode};
use marketplace_core::EventId;
use marketplace_core::event::{Event, EventFilter, ListingsNearEvent, NearbyQuery, NewEvent};
use marketplace_core::pagination::DataEnvelope;
use marketplace_web::{ApiJson, ApiPath, ApiQuery, WebResult};

/// List events, earliest first.
///
/// Public endpoint - no authentication required. Only active events are
/// returned unless `isActive=false` is passed.
///
/// # Example
///
/// ```bash
/// curl "http://localhost:3001/events?city=paris&startDate=2024-07-01&endDate=2024-08-31"
/// ```
pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<EventFilter>,
) -> WebResult<Json<DataEnvelope<Event>>> {
    let events = state.events.find_all(filter).await?;
    Ok(Json(events.into()))
}

/// Get event details by ID.
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EventId>,
) -> WebResult<Json<Event>> {
    let event = state.events.find_one(id).await?;
    Ok(Json(event))
}

/// Create an event. Requires authentication.
pub async fn create_event(
    _session: SessionUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewEvent>,
) -> WebResult<(StatusCode, Json<Event>)> {
    let event = state.events.create(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Listings linked to an event, nearest to the venue first.
///
/// # Example
///
/// ```bash
/// curl "http://localhost:3001/events/550e8400-e29b-41d4-a716-446655440000/listings?maxDistance=5&maxPrice=200"
/// ```
pub async fn listings_near_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EventId>,
    ApiQuery(query): ApiQuery<NearbyQuery>,
) -> WebResult<Json<ListingsNearEvent>> {
    let nearby = state.events.listings_near(id, query).await?;
    Ok(Json(nearby))
}
