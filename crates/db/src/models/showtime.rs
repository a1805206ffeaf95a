//! Showtime entity models and DTOs.

use michitra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `showtimes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Showtime {
    pub id: DbId,
    pub movie_id: DbId,
    pub theatre_id: DbId,
    pub show_time: Timestamp,
    pub total_seats: i32,
    pub available_seats: i32,
    pub price_per_seat_cents: i64,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a showtime via `POST /api/v1/showtimes` (admin only).
#[derive(Debug, Deserialize)]
pub struct CreateShowtime {
    pub movie_id: DbId,
    pub theatre_id: DbId,
    pub show_time: Timestamp,
    pub total_seats: i32,
    pub price_per_seat_cents: i64,
}

/// Query parameters for `GET /api/v1/showtimes`.
#[derive(Debug, Deserialize)]
pub struct ShowtimeListQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
