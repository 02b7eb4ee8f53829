//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Clinic Slots
//! API server. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `CLINIC_OPENS_AT`: First slot on regular days, `HH:MM` (default: "10:00")
//! - `CLINIC_CLOSES_AT`: Slots start strictly before this, `HH:MM` (default: "21:00")
//! - `SLOT_MINUTES`: Slot length and step (default: 30)
//! - `BOOKING_HORIZON_DAYS`: Days offered including today (default: 7)
//! - `SLOT_TIME_FORMAT`: `12h` or `24h` (default: "12h")
//! - `TODAY_START_RULE`: `legacy` or `next-slot` (default: "legacy")

use chrono::NaiveTime;
use clinic_slots_core::{
    models::window::{ServiceWindow, TodayRule},
    SlotCalculator, TimeFormat,
};
use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the Clinic Slots API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use clinic_slots_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Clinic hours and slot grid
    pub window: ServiceWindow,

    /// Display format for slot times, shared with the booking backend
    pub time_format: TimeFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            window: ServiceWindow::default(),
            time_format: TimeFormat::default(),
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - A clinic hour is not a valid `HH:MM` time
    /// - SLOT_MINUTES or BOOKING_HORIZON_DAYS is not a number
    /// - SLOT_TIME_FORMAT or TODAY_START_RULE names an unknown option
    /// - The resulting service window cannot hold a single slot
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // Network settings
        let host = env::var("API_HOST").unwrap_or(defaults.host);
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Clinic hours
        let window = ServiceWindow {
            opens_at: time_var("CLINIC_OPENS_AT", defaults.window.opens_at)?,
            closes_at: time_var("CLINIC_CLOSES_AT", defaults.window.closes_at)?,
            slot_minutes: number_var("SLOT_MINUTES", defaults.window.slot_minutes)?,
            horizon_days: number_var("BOOKING_HORIZON_DAYS", defaults.window.horizon_days)?,
            today_rule: match env::var("TODAY_START_RULE") {
                Ok(value) => value.parse::<TodayRule>()?,
                Err(_) => defaults.window.today_rule,
            },
        };
        window.validate()?;

        let time_format = match env::var("SLOT_TIME_FORMAT") {
            Ok(value) => value.parse::<TimeFormat>()?,
            Err(_) => defaults.time_format,
        };

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            window,
            time_format,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the calculator described by this configuration
    pub fn calculator(&self) -> Result<SlotCalculator> {
        Ok(SlotCalculator::new(self.window.clone(), self.time_format)?)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn time_var(name: &str, default: NaiveTime) -> Result<NaiveTime> {
    match env::var(name) {
        Ok(value) => NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .wrap_err_with(|| format!("{} must be a time like 10:00, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

fn number_var(name: &str, default: u32) -> Result<u32> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("{} must be a whole number, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}
