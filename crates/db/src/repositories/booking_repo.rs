//! Booking orchestrator: every reservation state transition, each as one
//! atomic transaction.
//!
//! Lock order is reservation row first, then showtime row (`book_seats` takes
//! only the showtime lock). No path takes them in the opposite order, so the
//! workflows cannot deadlock, and no transaction spans an external call.

use chrono::Utc;
use michitra_core::types::{DbId, Timestamp};
use michitra_core::{booking, reservation, seats};
use sqlx::{PgConnection, PgPool};

use crate::error::{BookingError, BookingResult};
use crate::models::payment::Payment;
use crate::models::reservation::{BookSeats, Reservation};
use crate::repositories::reservation_repo::{self, ReservationRepo};
use crate::repositories::{PaymentRepo, ShowtimeRepo};

/// Identity of the caller, as established by the API layer.
///
/// Admins may operate on any reservation; everyone else only on their own.
#[derive(Debug, Clone, Copy)]
pub struct Requester {
    pub user_id: DbId,
    pub is_admin: bool,
}

impl Requester {
    fn may_access(&self, reservation: &Reservation) -> bool {
        self.is_admin || reservation.user_id == self.user_id
    }
}

/// Coordinates inventory, reservations, and payments.
pub struct BookingRepo;

impl BookingRepo {
    /// Book `seat_count` seats on a showtime as a single atomic unit.
    ///
    /// Validates input, decrements inventory under the showtime row lock,
    /// checks explicit seat numbers against every seat-holding reservation
    /// for the showtime, and inserts the Reserved row with a 10-minute hold.
    /// Any failure rolls the whole unit back.
    pub async fn book_seats(
        pool: &PgPool,
        user_id: DbId,
        input: &BookSeats,
    ) -> BookingResult<Reservation> {
        seats::validate_seat_count(input.seat_count).map_err(BookingError::InvalidInput)?;
        let seat_numbers = match &input.seat_numbers {
            Some(raw) => Some(
                seats::normalize_seat_numbers(input.seat_count, raw)
                    .map_err(BookingError::InvalidInput)?,
            ),
            None => None,
        };
        let now = Utc::now();

        let mut tx = pool.begin().await?;

        // Takes the showtime row lock; concurrent bookings for this showtime
        // queue behind it, including their seat-conflict checks below.
        let hold =
            ShowtimeRepo::reserve_seats(&mut *tx, input.showtime_id, input.seat_count, now).await?;

        if let Some(seat_numbers) = &seat_numbers {
            let conflicts =
                Self::conflicting_seats(&mut *tx, input.showtime_id, seat_numbers).await?;
            if !conflicts.is_empty() {
                return Err(BookingError::SeatConflict { seats: conflicts });
            }
        }

        let total_price_cents =
            booking::total_price_cents(input.seat_count, hold.price_per_seat_cents);

        let query = format!(
            "INSERT INTO reservations \
             (user_id, showtime_id, seat_count, seat_numbers, total_price_cents, status_id, reservation_expiry) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            reservation_repo::COLUMNS
        );
        let created = sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .bind(input.showtime_id)
            .bind(input.seat_count)
            .bind(seat_numbers)
            .bind(total_price_cents)
            .bind(reservation::RESERVED)
            .bind(booking::hold_expiry(now))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            reservation_id = created.id,
            showtime_id = input.showtime_id,
            seat_count = input.seat_count,
            seats_left = hold.available_seats,
            "Seats reserved"
        );
        Ok(created)
    }

    /// Confirm a successful payment against a Reserved ticket.
    ///
    /// Legal only from Reserved with an unlapsed hold, and only when the paid
    /// amount equals the price snapshot. Inserts the Completed payment row
    /// and flips the reservation to Booked in the same transaction.
    pub async fn confirm_payment(
        pool: &PgPool,
        requester: Requester,
        reservation_id: DbId,
        transaction_id: &str,
        amount_cents: i64,
        method: &str,
    ) -> BookingResult<(Reservation, Payment)> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let reservation = ReservationRepo::lock_by_id(&mut *tx, reservation_id)
            .await?
            .ok_or(BookingError::ReservationNotFound(reservation_id))?;
        if !requester.may_access(&reservation) {
            return Err(BookingError::Forbidden(
                "Reservation belongs to another user".to_string(),
            ));
        }

        reservation::validate_transition(reservation.status_id, reservation::BOOKED)
            .map_err(BookingError::InvalidTransition)?;
        if booking::hold_lapsed(reservation.reservation_expiry, now) {
            // The sweeper has not run yet, but the hold is gone either way.
            return Err(BookingError::InvalidTransition(
                "Reservation hold has lapsed; the seats are being released".to_string(),
            ));
        }
        if amount_cents != reservation.total_price_cents {
            return Err(BookingError::AmountMismatch {
                expected_cents: reservation.total_price_cents,
                actual_cents: amount_cents,
            });
        }

        let payment = PaymentRepo::insert_completed(
            &mut *tx,
            transaction_id,
            reservation_id,
            amount_cents,
            method,
            now,
        )
        .await?;

        let query = format!(
            "UPDATE reservations \
             SET status_id = $2, reservation_expiry = NULL, \
                 payment_transaction_id = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            reservation_repo::COLUMNS
        );
        let booked = sqlx::query_as::<_, Reservation>(&query)
            .bind(reservation_id)
            .bind(reservation::BOOKED)
            .bind(transaction_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(reservation_id, transaction_id, "Payment confirmed, ticket booked");
        Ok((booked, payment))
    }

    /// Cancel a reservation and release its seats.
    ///
    /// Reserved tickets cancel any time; Booked tickets only while the show
    /// is more than the cancellation cutoff away. A Completed payment is
    /// marked Refunded in the same transaction.
    pub async fn cancel(
        pool: &PgPool,
        requester: Requester,
        reservation_id: DbId,
    ) -> BookingResult<Reservation> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let reservation = ReservationRepo::lock_by_id(&mut *tx, reservation_id)
            .await?
            .ok_or(BookingError::ReservationNotFound(reservation_id))?;
        if !requester.may_access(&reservation) {
            return Err(BookingError::Forbidden(
                "Reservation belongs to another user".to_string(),
            ));
        }

        reservation::validate_transition(reservation.status_id, reservation::CANCELLED)
            .map_err(BookingError::InvalidTransition)?;

        if reservation.status_id == reservation::BOOKED {
            // show_time never changes, so a plain read is enough here.
            let show_time = sqlx::query_scalar::<_, Timestamp>(
                "SELECT show_time FROM showtimes WHERE id = $1",
            )
            .bind(reservation.showtime_id)
            .fetch_one(&mut *tx)
            .await?;

            if !booking::booked_cancellation_open(show_time, now) {
                return Err(BookingError::CancellationWindowClosed { show_time });
            }
        }

        ShowtimeRepo::release_seats(&mut *tx, reservation.showtime_id, reservation.seat_count)
            .await?;
        let refunded = PaymentRepo::refund_completed(&mut *tx, reservation_id).await?;

        let cancelled =
            Self::store_transition(&mut *tx, reservation_id, reservation::CANCELLED).await?;

        tx.commit().await?;

        tracing::info!(
            reservation_id,
            showtime_id = reservation.showtime_id,
            seat_count = reservation.seat_count,
            refunded = refunded > 0,
            "Reservation cancelled, seats released"
        );
        Ok(cancelled)
    }

    /// Expire lapsed Reserved tickets: at most `batch_size` per call, each in
    /// its own transaction so one failure cannot corrupt the rest.
    ///
    /// Returns the number of reservations expired. Safe to re-run at any
    /// time; the lapse condition is re-checked under the row lock.
    pub async fn expire_due(pool: &PgPool, batch_size: i64) -> BookingResult<u64> {
        let due: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM reservations \
             WHERE status_id = $1 AND reservation_expiry <= NOW() \
             ORDER BY reservation_expiry ASC \
             LIMIT $2",
        )
        .bind(reservation::RESERVED)
        .bind(batch_size)
        .fetch_all(pool)
        .await?;

        let mut expired = 0u64;
        for reservation_id in due {
            if Self::expire_one(pool, reservation_id).await? {
                expired += 1;
            }
        }
        Ok(expired)
    }

    /// Expire a single reservation if it is still a lapsed hold.
    ///
    /// Returns `false` when the reservation was paid, cancelled, or already
    /// expired between the sweep query and this transaction.
    async fn expire_one(pool: &PgPool, reservation_id: DbId) -> BookingResult<bool> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let Some(reservation) = ReservationRepo::lock_by_id(&mut *tx, reservation_id).await? else {
            return Ok(false);
        };
        if reservation.status_id != reservation::RESERVED
            || !booking::hold_lapsed(reservation.reservation_expiry, now)
        {
            return Ok(false);
        }

        ShowtimeRepo::release_seats(&mut *tx, reservation.showtime_id, reservation.seat_count)
            .await?;
        Self::store_transition(&mut *tx, reservation_id, reservation::EXPIRED).await?;

        tx.commit().await?;

        tracing::debug!(
            reservation_id,
            showtime_id = reservation.showtime_id,
            seat_count = reservation.seat_count,
            "Reserved ticket expired, seats released"
        );
        Ok(true)
    }

    /// Mark Booked tickets whose show has started as Completed.
    ///
    /// No seat release: the seats were consumed by the show. Bounded to
    /// `batch_size` rows per call and idempotent (the status guard makes a
    /// second pass a no-op). Returns the number of rows completed.
    pub async fn complete_elapsed(pool: &PgPool, batch_size: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reservations SET status_id = $1, updated_at = NOW() \
             WHERE id IN ( \
                 SELECT r.id FROM reservations r \
                 JOIN showtimes s ON s.id = r.showtime_id \
                 WHERE r.status_id = $2 AND s.show_time <= NOW() \
                 ORDER BY s.show_time ASC \
                 LIMIT $3 \
                 FOR UPDATE OF r SKIP LOCKED \
             )",
        )
        .bind(reservation::COMPLETED)
        .bind(reservation::BOOKED)
        .bind(batch_size)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Seat numbers from seat-holding reservations that overlap the request.
    ///
    /// Caller must hold the showtime row lock so two requests for the same
    /// showtime cannot both pass this check.
    async fn conflicting_seats(
        conn: &mut PgConnection,
        showtime_id: DbId,
        seat_numbers: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT upper(seat) AS seat \
             FROM reservations r \
             CROSS JOIN LATERAL unnest(r.seat_numbers) AS seat \
             WHERE r.showtime_id = $1 AND r.status_id = ANY($2) \
               AND upper(seat) = ANY($3) \
             ORDER BY seat",
        )
        .bind(showtime_id)
        .bind(vec![reservation::RESERVED, reservation::BOOKED])
        .bind(seat_numbers)
        .fetch_all(conn)
        .await
    }

    /// Apply a terminal transition to a reservation row. Caller holds the
    /// row lock and has already validated the transition.
    async fn store_transition(
        conn: &mut PgConnection,
        reservation_id: DbId,
        status_id: i16,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "UPDATE reservations \
             SET status_id = $2, reservation_expiry = NULL, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            reservation_repo::COLUMNS
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(reservation_id)
            .bind(status_id)
            .fetch_one(conn)
            .await
    }
}
