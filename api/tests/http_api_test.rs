//! End-to-end HTTP tests over the real router, backed by in-memory storage.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use chrono::Duration;
use marketplace_api::config::BookingConfig;
use marketplace_api::{AppState, build_router};
use marketplace_core::listing::Listing;
use marketplace_core::user::User;
use marketplace_testing::{InMemoryMarketplace, fixtures, test_clock};
use serde_json::{Value, json};
use std::sync::Arc;

struct TestApp {
    server: TestServer,
    store: InMemoryMarketplace,
    host: User,
    guest: User,
    listing: Listing,
}

const HOST_TOKEN: &str = "host-token";
const GUEST_TOKEN: &str = "guest-token";

fn app_with(booking: BookingConfig) -> TestApp {
    let store = InMemoryMarketplace::new();
    let host = store.insert_user(fixtures::user("host@example.com"));
    let guest = store.insert_user(fixtures::user("guest@example.com"));
    let listing = store.insert_listing(fixtures::listing_for(&host));

    let expires = fixtures::epoch() + Duration::days(1);
    store.insert_session(HOST_TOKEN, host.id, expires);
    store.insert_session(GUEST_TOKEN, guest.id, expires);

    let state = AppState::new(store.clone(), Arc::new(test_clock()), booking);
    let server = TestServer::new(build_router(state)).unwrap();

    TestApp {
        server,
        store,
        host,
        guest,
        listing,
    }
}

fn app() -> TestApp {
    app_with(BookingConfig::default())
}

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

fn booking_body(app: &TestApp, check_in: &str, check_out: &str, guests: u32) -> Value {
    json!({
        "listingId": app.listing.id,
        "checkIn": check_in,
        "checkOut": check_out,
        "numberOfGuests": guests,
    })
}

async fn create_booking(app: &TestApp) -> Value {
    let (name, value) = bearer(GUEST_TOKEN);
    let response = app
        .server
        .post("/bookings")
        .add_header(name, value)
        .json(&booking_body(app, "2024-06-10", "2024-06-13", 2))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

// ============================================================================
// Health & auth
// ============================================================================

#[tokio::test]
async fn health_and_readiness() {
    let app = app();
    app.server.get("/health").await.assert_status_ok();

    let response = app.server.get("/ready").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ready");

    app.store.set_unavailable(true);
    app.server
        .get("/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn protected_routes_require_a_live_session() {
    let app = app();
    app.server
        .get("/bookings/my-bookings")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = bearer("unknown-token");
    let response = app
        .server
        .get("/users/me")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], "UNAUTHORIZED");

    app.store
        .insert_session("stale", app.guest.id, fixtures::epoch() - Duration::hours(1));
    let (name, value) = bearer("stale");
    app.server
        .get("/users/me")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn responses_carry_a_correlation_id() {
    let app = app();
    let response = app.server.get("/health").await;
    assert!(response.headers().contains_key("x-correlation-id"));
}

// ============================================================================
// Bookings
// ============================================================================

#[tokio::test]
async fn booking_is_created_pending_with_listing_summary() {
    let app = app();
    let body = create_booking(&app).await;

    assert_eq!(body["status"], "pending");
    assert_eq!(body["totalPrice"], 300.0);
    assert_eq!(body["numberOfGuests"], 2);
    assert_eq!(body["listing"]["title"], app.listing.title);
    assert_eq!(body["listing"]["city"], "Lisbon");
    assert!(body["listing"].get("host").is_none());
}

#[tokio::test]
async fn too_many_guests_is_bad_request() {
    let app = app();
    let (name, value) = bearer(GUEST_TOKEN);
    let response = app
        .server
        .post("/bookings")
        .add_header(name, value)
        .json(&booking_body(&app, "2024-06-10", "2024-06-12", 3))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Listing can accommodate maximum 2 guests"
    );
}

#[tokio::test]
async fn same_day_check_out_is_bad_request() {
    let app = app();
    let (name, value) = bearer(GUEST_TOKEN);
    app.server
        .post("/bookings")
        .add_header(name, value)
        .json(&booking_body(&app, "2024-06-10", "2024-06-10", 1))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.store.booking_count(), 0);
}

#[tokio::test]
async fn sub_millisecond_stay_is_bad_request() {
    let app = app();
    let (name, value) = bearer(GUEST_TOKEN);
    let response = app
        .server
        .post("/bookings")
        .add_header(name, value)
        .json(&booking_body(
            &app,
            "2024-06-10T00:00:00Z",
            "2024-06-10T00:00:00.0005Z",
            1,
        ))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Check-out date must be after check-in date"
    );
    assert_eq!(app.store.booking_count(), 0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = app();
    let (name, value) = bearer(GUEST_TOKEN);
    let response = app
        .server
        .post("/bookings")
        .add_header(name, value)
        .json(&json!({ "listingId": app.listing.id, "checkIn": "soon" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn overlap_policy_answers_conflict() {
    let app = app_with(BookingConfig {
        reject_overlaps: true,
    });
    create_booking(&app).await;

    let (name, value) = bearer(GUEST_TOKEN);
    app.server
        .post("/bookings")
        .add_header(name, value)
        .json(&booking_body(&app, "2024-06-12", "2024-06-15", 1))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn booking_detail_is_visible_to_guest_and_host_only() {
    let app = app();
    let id = create_booking(&app).await["id"].as_str().unwrap().to_string();

    let (name, value) = bearer(HOST_TOKEN);
    let response = app
        .server
        .get(&format!("/bookings/{id}"))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["guest"]["email"], app.guest.email);
    assert_eq!(body["listing"]["host"]["email"], app.host.email);

    let stranger = app.store.insert_user(fixtures::user("stranger@example.com"));
    app.store
        .insert_session("stranger", stranger.id, fixtures::epoch() + Duration::days(1));
    let (name, value) = bearer("stranger");
    app.server
        .get(&format!("/bookings/{id}"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn my_bookings_are_wrapped_in_data() {
    let app = app();
    create_booking(&app).await;

    let (name, value) = bearer(GUEST_TOKEN);
    let response = app
        .server
        .get("/bookings/my-bookings")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["listing"]["host"]["id"], json!(app.host.id));
}

#[tokio::test]
async fn second_cancel_is_bad_request() {
    let app = app();
    let id = create_booking(&app).await["id"].as_str().unwrap().to_string();
    let path = format!("/bookings/{id}/cancel");

    let (name, value) = bearer(HOST_TOKEN);
    app.server
        .patch(&path)
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = bearer(GUEST_TOKEN);
    let response = app.server.patch(&path).add_header(name, value).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "cancelled");

    let (name, value) = bearer(GUEST_TOKEN);
    app.server
        .patch(&path)
        .add_header(name, value)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_or_malformed_booking_ids() {
    let app = app();
    let (name, value) = bearer(GUEST_TOKEN);
    app.server
        .get(&format!("/bookings/{}", marketplace_core::BookingId::new()))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let (name, value) = bearer(GUEST_TOKEN);
    app.server
        .get("/bookings/not-a-uuid")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn listing_search_is_paginated() {
    let app = app();
    for _ in 0..24 {
        app.store.insert_listing(fixtures::listing_for(&app.host));
    }

    let response = app.server.get("/listings?page=2&limit=10&city=LIS").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 25);
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert!(body["data"][0]["host"].get("reputationScore").is_some());
}

#[tokio::test]
async fn listing_search_rejects_bad_paging() {
    let app = app();
    app.server
        .get("/listings?page=0")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .get("/listings?accommodationType=castle")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_search_parameters_are_ignored() {
    let app = app();

    let response = app
        .server
        .get("/listings?maxGuests=&minPrice=&maxPrice=&accommodationType=&page=&limit=")
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);

    app.store.insert_event(fixtures::event("Summer Concert"));
    let response = app.server.get("/events?isActive=&startDate=").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn listing_detail_shows_public_host_profile() {
    let app = app();
    let response = app.server.get(&format!("/listings/{}", app.listing.id)).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["title"], app.listing.title);
    assert_eq!(body["host"]["isVerified"], true);
    assert!(body["host"].get("email").is_none());
}

#[tokio::test]
async fn host_creates_and_lists_own_listings() {
    let app = app();
    let (name, value) = bearer(HOST_TOKEN);
    let response = app
        .server
        .post("/listings")
        .add_header(name, value)
        .json(&json!({
            "title": "Whole flat by the river",
            "description": "Two bedrooms, balcony",
            "accommodationType": "entire",
            "pricePerNight": 180,
            "maxGuests": 4,
            "address": "5 River Road",
            "city": "Porto",
            "country": "Portugal",
            "latitude": 41.14,
            "longitude": -8.61,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Value>();
    assert_eq!(created["isActive"], true);
    assert_eq!(created["host"]["id"], json!(app.host.id));

    let (name, value) = bearer(HOST_TOKEN);
    let mine = app
        .server
        .get("/listings/my-listings")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(mine.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn listing_with_out_of_range_guests_is_rejected() {
    let app = app();
    let (name, value) = bearer(HOST_TOKEN);
    app.server
        .post("/listings")
        .add_header(name, value)
        .json(&json!({
            "title": "Hall",
            "description": "Big",
            "accommodationType": "shared",
            "pricePerNight": 10,
            "maxGuests": 50,
            "address": "1 Hall St",
            "city": "Porto",
            "country": "Portugal",
            "latitude": 41.14,
            "longitude": -8.61,
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_the_owner_updates_and_deletes() {
    let app = app();
    let path = format!("/listings/{}", app.listing.id);

    let (name, value) = bearer(GUEST_TOKEN);
    app.server
        .patch(&path)
        .add_header(name, value)
        .json(&json!({ "pricePerNight": 1 }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = bearer(HOST_TOKEN);
    let response = app
        .server
        .patch(&path)
        .add_header(name, value)
        .json(&json!({ "pricePerNight": 125.5 }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["pricePerNight"], 125.5);

    let (name, value) = bearer(GUEST_TOKEN);
    app.server
        .delete(&path)
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = bearer(HOST_TOKEN);
    let response = app.server.delete(&path).add_header(name, value).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Listing deleted successfully"
    );

    app.server.get(&path).await.assert_status_not_found();
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn events_are_filtered_and_wrapped_in_data() {
    let app = app();
    let event = app.store.insert_event(fixtures::event("Summer Concert"));
    app.store.insert_event(marketplace_core::event::Event {
        city: "Madrid".to_string(),
        country: "Spain".to_string(),
        ..fixtures::event("Madrid Open")
    });

    let response = app.server.get("/events?city=lisbon").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], json!(event.id));

    let before = app.server.get("/events?endDate=2025-01-15").await.json::<Value>();
    assert!(before["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn event_creation_accepts_legacy_longitude_spelling() {
    let app = app();
    let (name, value) = bearer(GUEST_TOKEN);
    let response = app
        .server
        .post("/events")
        .add_header(name, value)
        .json(&json!({
            "name": "Olympic Final",
            "eventType": "olympics",
            "startDate": "2024-07-26",
            "endDate": "2024-08-11",
            "city": "Paris",
            "country": "France",
            "venueLatitude": 48.92,
            "venueLogitude": 2.36,
            "venueName": "Stade de France",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Value>();
    assert_eq!(created["venueLongitude"], 2.36);
    assert_eq!(created["isActive"], true);

    let id = created["id"].as_str().unwrap();
    app.server
        .get(&format!("/events/{id}"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn listings_near_event_are_cut_and_sorted() {
    let app = app();
    let event = app.store.insert_event(fixtures::event("Cup Final"));
    let far = app.store.insert_listing(fixtures::listing_for(&app.host));
    let mid = app.store.insert_listing(fixtures::listing_for(&app.host));
    app.store.link_listing(event.id, far.id, Some(8.0));
    app.store.link_listing(event.id, mid.id, Some(4.5));
    app.store.link_listing(event.id, app.listing.id, Some(0.5));

    let response = app
        .server
        .get(&format!("/events/{}/listings?maxDistance=5", event.id))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();

    assert_eq!(body["event"]["name"], "Cup Final");
    assert_eq!(body["event"]["venueName"], "Estadio da Luz");
    let distances: Vec<f64> = body["listings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["distanceToVenue"].as_f64().unwrap())
        .collect();
    assert_eq!(distances, vec![0.5, 4.5]);
}

#[tokio::test]
async fn listings_near_unknown_event_is_not_found() {
    let app = app();
    app.server
        .get(&format!("/events/{}/listings", marketplace_core::EventId::new()))
        .await
        .assert_status_not_found();
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn me_returns_full_profile_and_public_view_hides_contact() {
    let app = app();
    let (name, value) = bearer(GUEST_TOKEN);
    let me = app
        .server
        .get("/users/me")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(me["email"], app.guest.email);

    let public = app
        .server
        .get(&format!("/users/{}", app.guest.id))
        .await
        .json::<Value>();
    assert_eq!(public["firstName"], "guest");
    assert!(public.get("email").is_none());
    assert!(public.get("phone").is_none());
}

#[tokio::test]
async fn profiles_are_updated_only_by_their_owner() {
    let app = app();
    let (name, value) = bearer(GUEST_TOKEN);
    let response = app
        .server
        .patch("/users/me")
        .add_header(name, value)
        .json(&json!({ "bio": "Travels for football", "isHost": true }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["bio"], "Travels for football");
    assert_eq!(body["isHost"], true);

    let (name, value) = bearer(GUEST_TOKEN);
    app.server
        .patch(&format!("/users/{}", app.host.id))
        .add_header(name, value)
        .json(&json!({ "bio": "hijacked" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
