//! Route definitions, one module per resource.

pub mod bookings;
pub mod health;
pub mod payments;
pub mod showtimes;

use axum::Router;

use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/showtimes", showtimes::router())
        .nest("/bookings", bookings::router())
        .nest("/payments", payments::router())
}
