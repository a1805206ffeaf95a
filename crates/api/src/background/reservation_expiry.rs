//! Periodic reclamation of lapsed reservation holds.
//!
//! Spawns a background task that finds Reserved tickets whose 10-minute hold
//! has passed, cancels each in its own transaction, and returns the seats to
//! the showtime inventory. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use michitra_db::repositories::BookingRepo;

/// How often the expiry sweep runs.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Maximum reservations expired per tick. Bounded so a backlog cannot turn
/// one tick into an unbounded scan.
const DEFAULT_BATCH_SIZE: i64 = 100;

/// Run the reservation expiry loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("EXPIRY_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);
    let batch_size: i64 = std::env::var("SWEEP_BATCH_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_BATCH_SIZE);

    tracing::info!(interval_secs, batch_size, "Reservation expiry sweeper started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reservation expiry sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match BookingRepo::expire_due(&pool, batch_size).await {
                    Ok(expired) => {
                        if expired > 0 {
                            tracing::info!(expired, "Expired lapsed reservations, seats released");
                        } else {
                            tracing::debug!("No lapsed reservations to expire");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Reservation expiry sweep failed");
                    }
                }
            }
        }
    }
}
