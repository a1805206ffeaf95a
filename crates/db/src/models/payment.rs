//! Payment entity models and DTOs.

use michitra_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub transaction_id: String,
    pub reservation_id: DbId,
    pub amount_cents: i64,
    pub method: String,
    pub status_id: StatusId,
    pub paid_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /api/v1/payments/process`.
///
/// The stated amount must equal the reservation's price snapshot; a mismatch
/// is rejected before the gateway is charged or any record is written.
#[derive(Debug, Deserialize)]
pub struct ProcessPayment {
    pub reservation_id: DbId,
    pub amount_cents: i64,
    /// Payment method label, e.g. `"credit_card"`, `"upi"`.
    pub method: String,
}
