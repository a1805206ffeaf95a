//! Booking policy: hold duration, cancellation window, price snapshot.

use chrono::Duration;

use crate::types::Timestamp;

/// How long an unpaid reservation holds its seats before the expiry sweeper
/// reclaims them.
pub const RESERVATION_HOLD_MINUTES: i64 = 10;

/// A Booked reservation may only be cancelled while the showtime is at least
/// this far in the future.
pub const CANCELLATION_CUTOFF_HOURS: i64 = 2;

/// Expiry timestamp for a hold created at `now`.
pub fn hold_expiry(now: Timestamp) -> Timestamp {
    now + Duration::minutes(RESERVATION_HOLD_MINUTES)
}

/// Whether a Reserved ticket's hold has lapsed.
///
/// A Reserved row without an expiry would be a data bug; treat it as lapsed
/// rather than letting it hold seats forever.
pub fn hold_lapsed(reservation_expiry: Option<Timestamp>, now: Timestamp) -> bool {
    match reservation_expiry {
        Some(expiry) => expiry <= now,
        None => true,
    }
}

/// Whether a Booked reservation may still be cancelled.
///
/// Open strictly before `show_time - CANCELLATION_CUTOFF_HOURS`.
pub fn booked_cancellation_open(show_time: Timestamp, now: Timestamp) -> bool {
    now < show_time - Duration::hours(CANCELLATION_CUTOFF_HOURS)
}

/// Total price snapshot for a booking, in cents.
pub fn total_price_cents(seat_count: i32, price_per_seat_cents: i64) -> i64 {
    i64::from(seat_count) * price_per_seat_cents
}
