//! Handlers for the `/payments` resource.
//!
//! The reservation is validated (ownership, Reserved status, live hold,
//! exact amount) before the gateway is asked to charge, so a doomed
//! confirmation never captures money. The checks are repeated under the row
//! lock inside the confirmation transaction; a gateway call never holds
//! database locks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use michitra_core::{booking, reservation};
use michitra_db::error::BookingError;
use michitra_db::models::payment::{Payment, ProcessPayment};
use michitra_db::models::reservation::Reservation;
use michitra_db::repositories::{BookingRepo, PaymentRepo, ReservationRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::gateway;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a confirmed payment.
#[derive(Debug, Serialize)]
pub struct PaymentConfirmation {
    pub payment: Payment,
    pub reservation: Reservation,
}

/// POST /api/v1/payments/process
///
/// Charge the caller for a Reserved ticket and confirm the booking.
///
/// The stated amount must equal the reservation's price snapshot; mismatches
/// (and any other confirmation failure visible up front) are rejected before
/// the gateway is called. The unlocked pre-check can race a sweep or cancel,
/// so `confirm_payment` re-validates under the row lock before anything is
/// written.
pub async fn process(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<ProcessPayment>,
) -> AppResult<(StatusCode, Json<DataResponse<PaymentConfirmation>>)> {
    let current = ReservationRepo::find_by_id(&state.pool, body.reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(body.reservation_id))?;
    if !user.is_admin() && current.user_id != user.user_id {
        return Err(BookingError::Forbidden("Reservation belongs to another user".into()).into());
    }
    reservation::validate_transition(current.status_id, reservation::BOOKED)
        .map_err(BookingError::InvalidTransition)?;
    if booking::hold_lapsed(current.reservation_expiry, Utc::now()) {
        return Err(BookingError::InvalidTransition(
            "Reservation hold has lapsed; the seats are being released".to_string(),
        )
        .into());
    }
    if body.amount_cents != current.total_price_cents {
        return Err(BookingError::AmountMismatch {
            expected_cents: current.total_price_cents,
            actual_cents: body.amount_cents,
        }
        .into());
    }

    let outcome = gateway::charge(body.amount_cents, &body.method);
    if !outcome.success {
        return Err(BookingError::InvalidInput("Payment was declined".into()).into());
    }

    let (reservation, payment) = BookingRepo::confirm_payment(
        &state.pool,
        user.requester(),
        body.reservation_id,
        &outcome.transaction_id,
        body.amount_cents,
        &body.method,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PaymentConfirmation {
                payment,
                reservation,
            },
        }),
    ))
}

/// GET /api/v1/payments/{transaction_id}
///
/// Look up a payment by gateway transaction id; owner or admin only.
pub async fn get_by_transaction_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<String>,
) -> AppResult<Json<DataResponse<Payment>>> {
    let payment = PaymentRepo::find_by_transaction_id(&state.pool, &transaction_id)
        .await?
        .ok_or_else(|| BookingError::PaymentNotFound(transaction_id.clone()))?;

    let reservation = ReservationRepo::find_by_id(&state.pool, payment.reservation_id)
        .await?
        .ok_or(BookingError::ReservationNotFound(payment.reservation_id))?;
    if !user.is_admin() && reservation.user_id != user.user_id {
        return Err(BookingError::Forbidden("Payment belongs to another user".into()).into());
    }

    Ok(Json(DataResponse { data: payment }))
}
