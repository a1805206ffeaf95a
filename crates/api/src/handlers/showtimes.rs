//! Handlers for the `/showtimes` resource.
//!
//! Listing and seat lookups are public (browsing requires no account);
//! creation is admin-only. Movie and theatre metadata live in the external
//! catalog service, so a showtime only carries their ids.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use michitra_core::error::CoreError;
use michitra_core::types::DbId;
use michitra_db::models::showtime::{CreateShowtime, Showtime, ShowtimeListQuery};
use michitra_db::repositories::{ReservationRepo, ShowtimeRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/showtimes
///
/// Create a showtime with a full house of available seats.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateShowtime>,
) -> AppResult<(StatusCode, Json<DataResponse<Showtime>>)> {
    if body.total_seats <= 0 {
        return Err(CoreError::Validation("total_seats must be positive".into()).into());
    }
    if body.price_per_seat_cents < 0 {
        return Err(CoreError::Validation("price_per_seat_cents must not be negative".into()).into());
    }
    if body.show_time <= Utc::now() {
        return Err(CoreError::Validation("show_time must be in the future".into()).into());
    }

    let showtime = ShowtimeRepo::create(&state.pool, &body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: showtime })))
}

/// GET /api/v1/showtimes
///
/// List upcoming showtimes, soonest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ShowtimeListQuery>,
) -> AppResult<Json<DataResponse<Vec<Showtime>>>> {
    let showtimes = ShowtimeRepo::list_upcoming(&state.pool, &query).await?;
    Ok(Json(DataResponse { data: showtimes }))
}

/// GET /api/v1/showtimes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Showtime>>> {
    let showtime = ShowtimeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Showtime",
            id,
        })?;
    Ok(Json(DataResponse { data: showtime }))
}

/// GET /api/v1/showtimes/{id}/booked-seats
///
/// Seat numbers currently held (Reserved or Booked) for the showtime, so the
/// seat-selection UI can grey them out.
pub async fn booked_seats(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    // 404 for an unknown showtime rather than an empty list.
    ShowtimeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Showtime",
            id,
        })?;

    let seats = ReservationRepo::booked_seats(&state.pool, id).await?;
    Ok(Json(DataResponse { data: seats }))
}
