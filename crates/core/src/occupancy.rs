//! Occupancy status derivation for showtimes.
//!
//! Status is a pure function of the seat counts and is recomputed on every
//! seat mutation (reserve, release) so the stored value can never drift from
//! the counts it is derived from. The status IDs match the seed order of the
//! `showtime_statuses` lookup table; they are intentionally duplicated from
//! the `db` crate's enum because `core` must have zero internal deps.

/// Showtime status ID: seats remain and occupancy is below the warning level.
pub const AVAILABLE: i16 = 1;

/// Showtime status ID: occupancy at or above [`ALMOST_FULL_THRESHOLD`].
pub const ALMOST_FULL: i16 = 2;

/// Showtime status ID: every seat is held or consumed.
pub const SOLD_OUT: i16 = 3;

/// Occupancy ratio at which a showtime is flagged as almost full.
pub const ALMOST_FULL_THRESHOLD: f64 = 0.8;

/// Fraction of seats occupied, in `[0.0, 1.0]`.
///
/// A showtime with zero total seats cannot exist (enforced by a CHECK
/// constraint), but the guard keeps this function total for any input.
pub fn occupancy_ratio(total_seats: i32, available_seats: i32) -> f64 {
    if total_seats <= 0 {
        return 1.0;
    }
    f64::from(total_seats - available_seats) / f64::from(total_seats)
}

/// Derive the status ID for the given seat counts.
///
/// SoldOut at 100% occupancy, AlmostFull at >= 80%, Available otherwise.
pub fn status_id_for(total_seats: i32, available_seats: i32) -> i16 {
    let ratio = occupancy_ratio(total_seats, available_seats);
    if ratio >= 1.0 {
        SOLD_OUT
    } else if ratio >= ALMOST_FULL_THRESHOLD {
        ALMOST_FULL
    } else {
        AVAILABLE
    }
}
