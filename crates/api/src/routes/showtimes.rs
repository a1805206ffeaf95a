//! Route definitions for the `/showtimes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::showtimes;
use crate::state::AppState;

/// Routes mounted at `/showtimes`.
///
/// ```text
/// POST   /                    -> create showtime (admin)
/// GET    /                    -> list upcoming showtimes
/// GET    /{id}                -> fetch one showtime
/// GET    /{id}/booked-seats   -> occupied seat numbers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(showtimes::create).get(showtimes::list))
        .route("/{id}", get(showtimes::get_by_id))
        .route("/{id}/booked-seats", get(showtimes::booked_seats))
}
