//! Periodic closeout of finished shows.
//!
//! Marks Booked tickets whose showtime has started as Completed. Seats are
//! not released: they were consumed by the show. A second pass over the same
//! tickets is a no-op, so the sweep is safe to re-run at any time.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use michitra_db::repositories::BookingRepo;

/// How often the completion sweep runs.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Maximum reservations completed per tick.
const DEFAULT_BATCH_SIZE: i64 = 500;

/// Run the show completion loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("COMPLETION_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);

    tracing::info!(interval_secs, "Show completion sweeper started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Show completion sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match BookingRepo::complete_elapsed(&pool, DEFAULT_BATCH_SIZE).await {
                    Ok(completed) => {
                        if completed > 0 {
                            tracing::info!(completed, "Marked finished-show tickets as completed");
                        } else {
                            tracing::debug!("No tickets to complete");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Show completion sweep failed");
                    }
                }
            }
        }
    }
}
