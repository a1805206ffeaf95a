//! Reservation (ticket) entity models and DTOs.

use michitra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `reservations` table.
///
/// `total_price_cents` is a snapshot taken at booking time and is never
/// recomputed from the showtime's current price. `reservation_expiry` is set
/// only while the reservation is in `Reserved` status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub user_id: DbId,
    pub showtime_id: DbId,
    pub seat_count: i32,
    pub seat_numbers: Option<Vec<String>>,
    pub total_price_cents: i64,
    pub status_id: StatusId,
    pub reservation_expiry: Option<Timestamp>,
    pub payment_transaction_id: Option<String>,
    pub booked_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for booking seats via `POST /api/v1/bookings`.
#[derive(Debug, Deserialize)]
pub struct BookSeats {
    pub showtime_id: DbId,
    pub seat_count: i32,
    /// Explicit seat labels, e.g. `["A1", "A2"]`. When present the set size
    /// must equal `seat_count`.
    pub seat_numbers: Option<Vec<String>>,
}
