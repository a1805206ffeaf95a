//! Handlers for the `/bookings` resource.
//!
//! All endpoints require an authenticated principal; the identity is passed
//! explicitly into the booking operations rather than read from ambient
//! context. Ownership checks compare the reservation's user id against the
//! caller unless the caller is an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use michitra_core::types::DbId;
use michitra_db::error::BookingError;
use michitra_db::models::reservation::{BookSeats, Reservation};
use michitra_db::repositories::{BookingRepo, ReservationRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/bookings
///
/// Reserve seats on a showtime. On success the seats are held for 10 minutes
/// pending payment.
pub async fn book(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<BookSeats>,
) -> AppResult<(StatusCode, Json<DataResponse<Reservation>>)> {
    let reservation = BookingRepo::book_seats(&state.pool, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

/// GET /api/v1/bookings
///
/// List the calling user's reservations, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Reservation>>>> {
    let reservations = ReservationRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: reservations }))
}

/// GET /api/v1/bookings/{id}
///
/// Fetch one reservation; owner or admin only.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Reservation>>> {
    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(BookingError::ReservationNotFound(id))?;
    if !user.is_admin() && reservation.user_id != user.user_id {
        return Err(BookingError::Forbidden("Reservation belongs to another user".into()).into());
    }
    Ok(Json(DataResponse { data: reservation }))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// Cancel a reservation, releasing its seats. Booked tickets can only be
/// cancelled while the show is more than 2 hours away; a completed payment
/// is refunded as part of the same operation.
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Reservation>>> {
    let cancelled = BookingRepo::cancel(&state.pool, user.requester(), id).await?;
    Ok(Json(DataResponse { data: cancelled }))
}
