//! # Error Handling Middleware
//!
//! Maps domain errors from `clinic-slots-core` to HTTP status codes and a JSON
//! body of the form `{ "error": "<message>" }`, so every endpoint fails the
//! same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinic_slots_core::errors::SlotError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinic_slots_api::middleware::error_handling::AppError;
/// use clinic_slots_core::errors::SlotError;
///
/// async fn handler(slot_date: String) -> Result<Json<String>, AppError> {
///     if slot_date.is_empty() {
///         return Err(AppError(SlotError::Validation("slot_date is required".to_string())));
///     }
///     Ok(Json(slot_date))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `SlotResult` inside handlers
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}
