//! Repository for the `reservations` table: reads and row locks.
//!
//! State transitions happen in `BookingRepo`; this module provides lookups,
//! per-user listings, and the derived views (occupied seat numbers, held seat
//! totals) other components read.

use michitra_core::reservation;
use michitra_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::reservation::Reservation;

/// Column list for `reservations` queries.
pub(crate) const COLUMNS: &str = "\
    id, user_id, showtime_id, seat_count, seat_numbers, total_price_cents, \
    status_id, reservation_expiry, payment_transaction_id, booked_at, updated_at";

/// Provides read operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Find a reservation by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's reservations, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE user_id = $1 \
             ORDER BY booked_at DESC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Load a reservation under a row lock for a state transition.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// All seat numbers currently occupied for a showtime (Reserved or
    /// Booked reservations), sorted and upper-cased.
    pub async fn booked_seats(pool: &PgPool, showtime_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT upper(seat) AS seat \
             FROM reservations r \
             CROSS JOIN LATERAL unnest(r.seat_numbers) AS seat \
             WHERE r.showtime_id = $1 AND r.status_id = ANY($2) \
             ORDER BY seat",
        )
        .bind(showtime_id)
        .bind(seat_holding_statuses())
        .fetch_all(pool)
        .await
    }

    /// Total seats held (Reserved + Booked) against a showtime.
    ///
    /// For any showtime, `available_seats + held_seat_count == total_seats`
    /// must hold at all times.
    pub async fn held_seat_count(pool: &PgPool, showtime_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(seat_count), 0) \
             FROM reservations \
             WHERE showtime_id = $1 AND status_id = ANY($2)",
        )
        .bind(showtime_id)
        .bind(seat_holding_statuses())
        .fetch_one(pool)
        .await
    }
}

/// Status IDs that count against `available_seats`.
fn seat_holding_statuses() -> Vec<i16> {
    vec![reservation::RESERVED, reservation::BOOKED]
}
