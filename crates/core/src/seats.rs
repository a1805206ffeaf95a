//! Seat-count and seat-number validation for booking requests.
//!
//! Seat numbers are free-form labels (e.g. `"A12"`). They are normalised to
//! upper case before storage and comparison so `"a12"` and `"A12"` are the
//! same seat.

/// Minimum seats per booking.
pub const MIN_SEATS_PER_BOOKING: i32 = 1;

/// Maximum seats per booking.
pub const MAX_SEATS_PER_BOOKING: i32 = 10;

/// Validate the requested seat count against the per-booking limits.
pub fn validate_seat_count(seat_count: i32) -> Result<(), String> {
    if !(MIN_SEATS_PER_BOOKING..=MAX_SEATS_PER_BOOKING).contains(&seat_count) {
        return Err(format!(
            "Number of seats must be between {MIN_SEATS_PER_BOOKING} and {MAX_SEATS_PER_BOOKING}, got {seat_count}"
        ));
    }
    Ok(())
}

/// Normalise an explicit seat-number set for a booking of `seat_count` seats.
///
/// Trims whitespace and upper-cases each label, then checks:
/// - no label is empty,
/// - the set size equals `seat_count`,
/// - all labels are distinct (case-insensitively, post-normalisation).
///
/// Returns the normalised labels in request order.
pub fn normalize_seat_numbers(seat_count: i32, seat_numbers: &[String]) -> Result<Vec<String>, String> {
    if seat_numbers.len() != seat_count as usize {
        return Err(format!(
            "Expected {seat_count} seat numbers, got {}",
            seat_numbers.len()
        ));
    }

    let mut normalized = Vec::with_capacity(seat_numbers.len());
    for raw in seat_numbers {
        let seat = raw.trim().to_uppercase();
        if seat.is_empty() {
            return Err("Seat numbers must not be empty".to_string());
        }
        if normalized.contains(&seat) {
            return Err(format!("Duplicate seat number: {seat}"));
        }
        normalized.push(seat);
    }
    Ok(normalized)
}
