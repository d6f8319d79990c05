//! Listing endpoints.
//!
//! Search and detail are public; writes and `my-listings` require
//! authentication, and writes are limited to the owning host.

use crate::auth::SessionUser;
use crate::server::AppState;
use axum::{Json, extract::State, http::StatusCode};
use marketplace_core::ListingId;
use marketplace_core::listing::{Hosted, Listing, ListingChanges, ListingSearch, NewListing};
use marketplace_core::pagination::Page;
use marketplace_core::user::{HostSummary, PublicProfile};
use marketplace_web::{ApiJson, ApiPath, ApiQuery, WebResult};
use serde::Serialize;

/// Confirmation body for deletions.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Search active listings.
///
/// Public endpoint - no authentication required.
///
/// # Example
///
/// ```bash
/// curl "http://localhost:3001/listings?city=lisbon&accommodationType=private&maxPrice=150&page=2&limit=10"
/// ```
pub async fn list_listings(
    State(state): State<AppState>,
    ApiQuery(search): ApiQuery<ListingSearch>,
) -> WebResult<Json<Page<Hosted<HostSummary>>>> {
    let page = state.listings.find_all(search).await?;
    Ok(Json(page))
}

/// The caller's own listings, including inactive ones.
pub async fn my_listings(
    session: SessionUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<Listing>>> {
    let listings = state.listings.find_by_host(session.user_id).await?;
    Ok(Json(listings))
}

/// One listing with its host's public profile.
pub async fn get_listing(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ListingId>,
) -> WebResult<Json<Hosted<PublicProfile>>> {
    let listing = state.listings.find_one(id).await?;
    Ok(Json(listing))
}

/// Publish a listing hosted by the caller.
pub async fn create_listing(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewListing>,
) -> WebResult<(StatusCode, Json<Hosted<HostSummary>>)> {
    let created = state.listings.create(session.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update one of the caller's listings.
pub async fn update_listing(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ListingId>,
    ApiJson(changes): ApiJson<ListingChanges>,
) -> WebResult<Json<Hosted<HostSummary>>> {
    let updated = state.listings.update(id, session.user_id, changes).await?;
    Ok(Json(updated))
}

/// Delete one of the caller's listings.
pub async fn delete_listing(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ListingId>,
) -> WebResult<Json<MessageResponse>> {
    state.listings.remove(id, session.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Listing deleted successfully".to_string(),
    }))
}
