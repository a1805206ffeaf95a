//! Repository for the `payments` table.
//!
//! Payment rows are written inside `BookingRepo` transactions (confirm,
//! refund-on-cancel); this module also provides the standalone lookups the
//! payment API exposes.

use michitra_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::payment::Payment;
use crate::models::status::PaymentStatus;

/// Column list for `payments` queries.
const COLUMNS: &str = "\
    id, transaction_id, reservation_id, amount_cents, method, status_id, \
    paid_at, created_at, updated_at";

/// Provides operations for payment records.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a Completed payment row. Runs on the caller's transaction so
    /// the payment and the reservation transition commit together.
    ///
    /// The partial unique index on `reservation_id` rejects a second
    /// non-failed payment for the same reservation at the database level.
    pub async fn insert_completed(
        conn: &mut PgConnection,
        transaction_id: &str,
        reservation_id: DbId,
        amount_cents: i64,
        method: &str,
        paid_at: Timestamp,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments \
             (transaction_id, reservation_id, amount_cents, method, status_id, paid_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(transaction_id)
            .bind(reservation_id)
            .bind(amount_cents)
            .bind(method)
            .bind(PaymentStatus::Completed.id())
            .bind(paid_at)
            .fetch_one(conn)
            .await
    }

    /// Find a payment by its gateway transaction id.
    pub async fn find_by_transaction_id(
        pool: &PgPool,
        transaction_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE transaction_id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(transaction_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the non-failed payment for a reservation, if any.
    pub async fn find_by_reservation(
        pool: &PgPool,
        reservation_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments \
             WHERE reservation_id = $1 AND status_id <> $2"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(reservation_id)
            .bind(PaymentStatus::Failed.id())
            .fetch_optional(pool)
            .await
    }

    /// Mark a reservation's Completed payment as Refunded, if one exists.
    ///
    /// Returns the number of rows updated (0 when the reservation was never
    /// paid, e.g. a Reserved ticket being cancelled).
    pub async fn refund_completed(
        conn: &mut PgConnection,
        reservation_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE payments \
             SET status_id = $2, updated_at = NOW() \
             WHERE reservation_id = $1 AND status_id = $3",
        )
        .bind(reservation_id)
        .bind(PaymentStatus::Refunded.id())
        .bind(PaymentStatus::Completed.id())
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
