use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use michitra_core::error::CoreError;
use michitra_db::error::BookingError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`BookingError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A generic domain-level error from `michitra_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A booking-workflow error from `michitra_db`.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Booking(booking) => return booking_error_response(booking),

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        error_body(status, code, message)
    }
}

/// Map a [`BookingError`] to a status, machine-readable code, and message.
///
/// Business-rule violations keep their specific reason (which seats
/// conflicted, how many seats remain) so the client can send the user back
/// to seat selection instead of showing a generic failure.
fn booking_error_response(err: &BookingError) -> Response {
    let (status, code) = match err {
        BookingError::ShowtimeNotFound(_)
        | BookingError::ReservationNotFound(_)
        | BookingError::PaymentNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        BookingError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        BookingError::InsufficientInventory { .. } => {
            (StatusCode::CONFLICT, "INSUFFICIENT_INVENTORY")
        }
        BookingError::SeatConflict { .. } => (StatusCode::CONFLICT, "SEAT_CONFLICT"),
        BookingError::InvalidTransition(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
        BookingError::CancellationWindowClosed { .. } => {
            (StatusCode::CONFLICT, "CANCELLATION_WINDOW_CLOSED")
        }
        BookingError::ShowEnded(_) => (StatusCode::BAD_REQUEST, "SHOW_ENDED"),
        BookingError::AmountMismatch { .. } => (StatusCode::BAD_REQUEST, "AMOUNT_MISMATCH"),
        BookingError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        BookingError::InventoryCorruption { .. } => {
            tracing::error!(error = %err, "Inventory corruption detected");
            return error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            );
        }
        BookingError::Database(db_err) => {
            let (status, code, message) = classify_sqlx_error(db_err);
            return error_body(status, code, message);
        }
    };
    error_body(status, code, err.to_string())
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn error_body(status: StatusCode, code: &'static str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}
