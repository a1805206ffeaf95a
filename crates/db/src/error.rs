//! Typed failures for the booking workflows.
//!
//! Every expected business-rule violation is a distinct variant so callers
//! can return a specific reason (which seats conflicted, how many seats
//! remain) instead of a generic error. None of these are retried
//! automatically: a blind retry could double-decrement seat inventory.

use michitra_core::types::{DbId, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Showtime {0} not found")]
    ShowtimeNotFound(DbId),

    #[error("Reservation {0} not found")]
    ReservationNotFound(DbId),

    #[error("Payment {0} not found")]
    PaymentNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not enough seats available: requested {requested}, {available} left")]
    InsufficientInventory { requested: i32, available: i32 },

    #[error("Seats already taken: {}", seats.join(", "))]
    SeatConflict { seats: Vec<String> },

    #[error("{0}")]
    InvalidTransition(String),

    #[error("Cancellation window closed for the show starting at {show_time}")]
    CancellationWindowClosed { show_time: Timestamp },

    #[error("Showtime {0} has already started")]
    ShowEnded(DbId),

    #[error("Payment amount {actual_cents} does not match the ticket price {expected_cents}")]
    AmountMismatch { expected_cents: i64, actual_cents: i64 },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The seat-conservation invariant was violated. This is a bug in the
    /// transaction discipline, not a user error; logged at error severity
    /// and surfaced as an internal error.
    #[error("Seat inventory corrupted for showtime {showtime_id}: {detail}")]
    InventoryCorruption { showtime_id: DbId, detail: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type BookingResult<T> = Result<T, BookingError>;
