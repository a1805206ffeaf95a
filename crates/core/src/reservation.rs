//! Reservation lifecycle state machine.
//!
//! A reservation starts as a 10-minute hold (`Reserved`) and either advances
//! to `Booked` on payment, or is reclaimed by the expiry sweeper. Status IDs
//! match the seed order of the `reservation_statuses` lookup table and are
//! intentionally duplicated from the `db` crate's enum because `core` must
//! have zero internal deps.
//!
//! ```text
//! Reserved --(payment success)-------------> Booked
//! Reserved --(expiry sweep)----------------> Expired    seats released
//! Reserved --(explicit cancel)-------------> Cancelled  seats released
//! Booked   --(cancel before cutoff)--------> Cancelled  seats released
//! Booked   --(completion sweep)------------> Completed  seats consumed
//! ```

/// Unpaid hold against a showtime's inventory. Seats are counted as held.
pub const RESERVED: i16 = 1;

/// Payment-confirmed booking. Seats are counted as held.
pub const BOOKED: i16 = 2;

/// Terminal: cancelled by the user. Seats released.
pub const CANCELLED: i16 = 3;

/// Terminal: hold lapsed and was reclaimed by the sweeper. Seats released.
///
/// Kept distinct from [`CANCELLED`] so a user can tell "I cancelled this"
/// apart from "my hold timed out"; seat-release behaviour is identical.
pub const EXPIRED: i16 = 4;

/// Terminal: the show has taken place. Seats were consumed, none released.
pub const COMPLETED: i16 = 5;

/// Returns the set of valid target status IDs reachable from `from_status`.
///
/// Terminal states (Cancelled, Expired, Completed) return an empty slice
/// because no further transitions are allowed.
pub fn valid_transitions(from_status: i16) -> &'static [i16] {
    match from_status {
        RESERVED => &[BOOKED, CANCELLED, EXPIRED],
        BOOKED => &[CANCELLED, COMPLETED],
        CANCELLED | EXPIRED | COMPLETED => &[],
        // Unknown status: no transitions allowed
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: i16, to: i16) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a state transition, returning an error message for invalid ones.
pub fn validate_transition(from: i16, to: i16) -> Result<(), String> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(format!(
            "Invalid transition: {} ({from}) -> {} ({to})",
            status_name(from),
            status_name(to)
        ))
    }
}

/// Whether a reservation in this status counts against `available_seats`.
pub fn holds_seats(status: i16) -> bool {
    matches!(status, RESERVED | BOOKED)
}

/// Whether this status admits no further transitions.
pub fn is_terminal(status: i16) -> bool {
    valid_transitions(status).is_empty()
}

/// Human-readable name for a status ID (for error messages).
pub fn status_name(id: i16) -> &'static str {
    match id {
        RESERVED => "Reserved",
        BOOKED => "Booked",
        CANCELLED => "Cancelled",
        EXPIRED => "Expired",
        COMPLETED => "Completed",
        _ => "Unknown",
    }
}
