//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`. All require authentication.
///
/// ```text
/// POST   /               -> book seats (10-minute hold)
/// GET    /               -> list the caller's reservations
/// GET    /{id}           -> fetch one reservation (owner or admin)
/// POST   /{id}/cancel    -> cancel and release seats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::book).get(bookings::list_mine))
        .route("/{id}", get(bookings::get_by_id))
        .route("/{id}/cancel", post(bookings::cancel))
}
