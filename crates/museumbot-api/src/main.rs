//! Museumbot API server entry point.

use std::sync::Arc;

use museumbot_api::config::Config;
use museumbot_api::error::AppError;
use museumbot_api::rate_limit::RateLimiter;
use museumbot_api::state::{AppState, StorageMode};
use museumbot_conversation::application::dispatcher::Dispatcher;
use museumbot_conversation::application::handlers::Collaborators;
use museumbot_conversation::application::session_store::SessionStore;
use museumbot_core::clock::{Clock, SystemClock};
use museumbot_core::collaborators::{BookingSink, VenueDirectory};
use museumbot_core::rng::StdRngSource;
use museumbot_store::availability::RandomAvailability;
use museumbot_store::memory::{InMemoryBookingSink, InMemoryVenueDirectory};
use museumbot_store::pg_booking_sink::PgBookingSink;
use museumbot_store::pg_venue_directory::PgVenueDirectory;
use museumbot_store::sample::sample_venues;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting museum ticket booking assistant");

    let config = Config::from_env()?;

    // Choose storage collaborators.
    let venues: Arc<dyn VenueDirectory>;
    let bookings: Arc<dyn BookingSink>;
    let storage;
    if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::migrate!("../../migrations").run(&pool).await?;

        let directory = PgVenueDirectory::new(pool.clone());
        directory.seed_if_empty(&sample_venues()).await?;
        venues = Arc::new(directory);
        bookings = Arc::new(PgBookingSink::new(pool));
        storage = StorageMode::Postgres;
    } else {
        tracing::warn!("DATABASE_URL not set, using in-memory venues and bookings");
        venues = Arc::new(InMemoryVenueDirectory::with_samples());
        bookings = Arc::new(InMemoryBookingSink::new());
        storage = StorageMode::InMemory;
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let availability = Arc::new(RandomAvailability::new(
        StdRngSource::from_os_rng(),
        config.availability_rate,
    ));

    // Build application state.
    let dispatcher = Dispatcher::new(
        Arc::new(SessionStore::new()),
        Collaborators {
            venues,
            availability,
            bookings,
            clock: clock.clone(),
        },
    );
    let rate_limiter = RateLimiter::new(
        config.rate_limit_max_messages,
        config.rate_limit_window,
        clock,
    );
    let app_state = AppState::new(dispatcher, rate_limiter, storage);

    // Build router.
    let app = museumbot_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(museumbot_api::cors_layer(&config.cors_allowed_origins)?);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
