//! Route definitions for the `/payments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`. All require authentication.
///
/// ```text
/// POST   /process            -> charge a Reserved ticket, confirm booking
/// GET    /{transaction_id}   -> fetch a payment record (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process", post(payments::process))
        .route("/{transaction_id}", get(payments::get_by_transaction_id))
}
