//! # Clinic Slots API
//!
//! HTTP service exposing the appointment slot calculation to the booking
//! frontend and to the booking backend, so both sides share one
//! implementation of the date key and time formats.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into calls on the calculator
//! - **Middleware**: Error mapping shared by all handlers
//! - **Config**: Environment configuration, including clinic hours
//!
//! The service is stateless; every request carries the doctor's booked slots.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use clinic_slots_core::{Clock, SlotCalculator, SystemClock};
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Slot calculation configured with the clinic's hours
    pub calculator: SlotCalculator,
    /// Time source used when a request does not pin `now`
    pub clock: Arc<dyn Clock>,
}

impl ApiState {
    pub fn new(calculator: SlotCalculator) -> Self {
        Self {
            calculator,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(calculator: SlotCalculator, clock: Arc<dyn Clock>) -> Self {
        Self { calculator, clock }
    }
}

/// Builds the router with all routes and layers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use clinic_slots_api::{app, config::ApiConfig, ApiState};
/// use clinic_slots_core::SlotCalculator;
///
/// let state = Arc::new(ApiState::new(SlotCalculator::default()));
/// let router = app(state, &ApiConfig::default());
/// ```
pub fn app(state: Arc<ApiState>, config: &config::ApiConfig) -> Router {
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot availability endpoints
        .merge(routes::slots::routes())
        .with_state(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration
///
/// Installs the global tracing subscriber, builds the calculator from the
/// configured clinic hours and serves until the process is stopped.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let calculator = config.calculator()?;
    info!(
        opens_at = %config.window.opens_at,
        closes_at = %config.window.closes_at,
        slot_minutes = config.window.slot_minutes,
        horizon_days = config.window.horizon_days,
        today_rule = %config.window.today_rule,
        time_format = %config.time_format,
        "Slot calculator configured"
    );

    let state = Arc::new(ApiState::new(calculator));
    let app = app(state, &config);

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
