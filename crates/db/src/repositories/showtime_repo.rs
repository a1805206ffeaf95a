//! Repository for the `showtimes` table: the seat-inventory ledger.
//!
//! All seat-count mutations go through [`ShowtimeRepo::reserve_seats`] and
//! [`ShowtimeRepo::release_seats`]. Both take the showtime row lock
//! (`SELECT ... FOR UPDATE`), so concurrent mutations for one showtime
//! serialize while different showtimes never contend. The derived occupancy
//! status is recomputed from `michitra_core::occupancy` on every mutation.

use michitra_core::occupancy;
use michitra_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::error::{BookingError, BookingResult};
use crate::models::showtime::{CreateShowtime, Showtime, ShowtimeListQuery};
use crate::models::status::ShowtimeStatus;

/// Column list for `showtimes` queries.
const COLUMNS: &str = "\
    id, movie_id, theatre_id, show_time, total_seats, available_seats, \
    price_per_seat_cents, status_id, created_at, updated_at";

/// Maximum page size for showtime listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for showtime listing.
const DEFAULT_LIMIT: i64 = 50;

/// Inventory fields of a showtime row held under `FOR UPDATE`.
#[derive(Debug, sqlx::FromRow)]
pub struct ShowtimeInventory {
    pub id: DbId,
    pub show_time: Timestamp,
    pub total_seats: i32,
    pub available_seats: i32,
    pub price_per_seat_cents: i64,
}

/// Outcome of a successful seat reservation.
#[derive(Debug)]
pub struct SeatHold {
    /// Per-seat price snapshot taken while the row was locked.
    pub price_per_seat_cents: i64,
    /// Seats remaining after the decrement.
    pub available_seats: i32,
}

/// Provides CRUD and inventory operations for showtimes.
pub struct ShowtimeRepo;

impl ShowtimeRepo {
    /// Create a showtime with a full house of available seats.
    pub async fn create(pool: &PgPool, input: &CreateShowtime) -> Result<Showtime, sqlx::Error> {
        let query = format!(
            "INSERT INTO showtimes \
             (movie_id, theatre_id, show_time, total_seats, available_seats, price_per_seat_cents, status_id) \
             VALUES ($1, $2, $3, $4, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(input.movie_id)
            .bind(input.theatre_id)
            .bind(input.show_time)
            .bind(input.total_seats)
            .bind(input.price_per_seat_cents)
            .bind(ShowtimeStatus::Available.id())
            .fetch_one(pool)
            .await
    }

    /// Find a showtime by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Showtime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM showtimes WHERE id = $1");
        sqlx::query_as::<_, Showtime>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List showtimes that have not started yet, soonest first.
    pub async fn list_upcoming(
        pool: &PgPool,
        query_params: &ShowtimeListQuery,
    ) -> Result<Vec<Showtime>, sqlx::Error> {
        let limit = query_params
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(0, MAX_LIMIT);
        let offset = query_params.offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM showtimes \
             WHERE show_time > NOW() \
             ORDER BY show_time ASC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Load a showtime's inventory fields under a row lock.
    ///
    /// The lock is held until the surrounding transaction commits; all other
    /// seat mutations for this showtime block behind it.
    pub async fn lock_inventory(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ShowtimeInventory>, sqlx::Error> {
        sqlx::query_as::<_, ShowtimeInventory>(
            "SELECT id, show_time, total_seats, available_seats, price_per_seat_cents \
             FROM showtimes WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Decrement `available_seats` by `seat_count` and recompute the status.
    ///
    /// Fails with `ShowtimeNotFound`, `ShowEnded` (show already started), or
    /// `InsufficientInventory` without mutating anything. Must run inside the
    /// caller's transaction so a later failure rolls the decrement back.
    pub async fn reserve_seats(
        conn: &mut PgConnection,
        showtime_id: DbId,
        seat_count: i32,
        now: Timestamp,
    ) -> BookingResult<SeatHold> {
        let inventory = Self::lock_inventory(conn, showtime_id)
            .await?
            .ok_or(BookingError::ShowtimeNotFound(showtime_id))?;

        if inventory.show_time <= now {
            return Err(BookingError::ShowEnded(showtime_id));
        }
        if inventory.available_seats < seat_count {
            return Err(BookingError::InsufficientInventory {
                requested: seat_count,
                available: inventory.available_seats,
            });
        }

        let available_seats = inventory.available_seats - seat_count;
        Self::store_seat_count(conn, showtime_id, inventory.total_seats, available_seats).await?;

        Ok(SeatHold {
            price_per_seat_cents: inventory.price_per_seat_cents,
            available_seats,
        })
    }

    /// Increment `available_seats` by `seat_count` and recompute the status.
    ///
    /// Releasing more seats than the house holds means a reservation was
    /// double-released somewhere; that is `InventoryCorruption`, never a
    /// silent clamp.
    pub async fn release_seats(
        conn: &mut PgConnection,
        showtime_id: DbId,
        seat_count: i32,
    ) -> BookingResult<i32> {
        let inventory = Self::lock_inventory(conn, showtime_id).await?.ok_or_else(|| {
            // Reservations have an FK to showtimes, so a missing row here
            // means referential state is broken.
            BookingError::InventoryCorruption {
                showtime_id,
                detail: "showtime row missing while releasing seats".to_string(),
            }
        })?;

        let available_seats = inventory.available_seats + seat_count;
        if available_seats > inventory.total_seats {
            tracing::error!(
                showtime_id,
                seat_count,
                available = inventory.available_seats,
                total = inventory.total_seats,
                "Seat release would exceed total seats"
            );
            return Err(BookingError::InventoryCorruption {
                showtime_id,
                detail: format!(
                    "releasing {seat_count} seats would exceed total {} (currently {} available)",
                    inventory.total_seats, inventory.available_seats
                ),
            });
        }

        Self::store_seat_count(conn, showtime_id, inventory.total_seats, available_seats).await?;
        Ok(available_seats)
    }

    /// Persist a new seat count with its derived status. Caller holds the row lock.
    async fn store_seat_count(
        conn: &mut PgConnection,
        showtime_id: DbId,
        total_seats: i32,
        available_seats: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE showtimes \
             SET available_seats = $2, status_id = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(showtime_id)
        .bind(available_seats)
        .bind(occupancy::status_id_for(total_seats, available_seats))
        .execute(conn)
        .await?;
        Ok(())
    }
}
