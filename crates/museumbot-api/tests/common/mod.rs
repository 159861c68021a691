//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{NaiveDate, TimeDelta};
use http_body_util::BodyExt;
use museumbot_conversation::application::dispatcher::Dispatcher;
use museumbot_conversation::application::handlers::Collaborators;
use museumbot_conversation::application::session_store::SessionStore;
use museumbot_core::clock::Clock;
use museumbot_core::collaborators::{AvailabilityOracle, BookingSink};
use museumbot_store::memory::InMemoryVenueDirectory;
use museumbot_test_support::{FixedAvailability, FixedClock, RecordingBookingSink};
use tower::ServiceExt;

use museumbot_api::rate_limit::RateLimiter;
use museumbot_api::state::{AppState, StorageMode};

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> FixedClock {
    FixedClock(chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap())
}

/// A visit date `days` after the fixed clock's local calendar day.
pub fn days_from_today(days: u64) -> NaiveDate {
    fixed_clock()
        .today()
        .checked_add_days(chrono::Days::new(days))
        .unwrap()
}

/// Build the full app router over the sample venues with every date
/// available. Uses the same route structure as `main.rs`.
pub fn build_test_app(bookings: Arc<dyn BookingSink>) -> Router {
    build_test_app_with(Arc::new(FixedAvailability(true)), bookings, 100)
}

/// Build the full app router with a recording sink that is discarded.
pub fn build_default_test_app() -> Router {
    build_test_app(Arc::new(RecordingBookingSink::new()))
}

/// Build the full app router with custom availability, booking sink, and
/// rate limit.
pub fn build_test_app_with(
    availability: Arc<dyn AvailabilityOracle>,
    bookings: Arc<dyn BookingSink>,
    max_messages: usize,
) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(fixed_clock());
    let dispatcher = Dispatcher::new(
        Arc::new(SessionStore::new()),
        Collaborators {
            venues: Arc::new(InMemoryVenueDirectory::with_samples()),
            availability,
            bookings,
            clock: clock.clone(),
        },
    );
    let rate_limiter = RateLimiter::new(max_messages, TimeDelta::seconds(60), clock);

    museumbot_api::build_router(AppState::new(dispatcher, rate_limiter, StorageMode::InMemory))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send one chat message and return the reply text.
pub async fn say(app: &Router, identity: &str, text: &str) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/messages",
        &serde_json::json!({ "identity": identity, "text": text }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["reply"].as_str().unwrap().to_owned()
}
