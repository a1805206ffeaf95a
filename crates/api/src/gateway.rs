//! Mock payment gateway.
//!
//! Stands in for the external payment provider: it issues a transaction id
//! and always reports success, so the full Reserved -> Booked flow can be
//! exercised end to end without a real processor. Swapping in a real gateway
//! only touches this module; the booking transaction consumes the outcome
//! after the charge has settled, never during it.

use rand::Rng;

/// Transaction id length issued by the mock gateway.
const TRANSACTION_ID_LEN: usize = 12;

const TRANSACTION_ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Outcome reported by the gateway for a charge attempt.
#[derive(Debug)]
pub struct ChargeOutcome {
    pub transaction_id: String,
    pub success: bool,
}

/// Charge the given amount. The mock always succeeds.
pub fn charge(amount_cents: i64, method: &str) -> ChargeOutcome {
    let transaction_id = generate_transaction_id();
    tracing::info!(
        transaction_id = %transaction_id,
        amount_cents,
        method,
        "Mock gateway charge accepted"
    );
    ChargeOutcome {
        transaction_id,
        success: true,
    }
}

/// A 12-character uppercase alphanumeric id, matching what real gateways hand
/// back as a reference number.
fn generate_transaction_id() -> String {
    let mut rng = rand::rng();
    (0..TRANSACTION_ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TRANSACTION_ID_CHARS.len());
            TRANSACTION_ID_CHARS[idx] as char
        })
        .collect()
}
