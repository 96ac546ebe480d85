use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::use_cases::session::SessionUseCases;

/// Periodically deletes refresh tokens past their expiry. Revoked rows that
/// have not yet expired are kept.
pub async fn run_refresh_token_cleanup_loop(
    session_use_cases: Arc<SessionUseCases>,
    every: Duration,
) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Refresh token cleanup started (every {}s)",
        every.as_secs()
    );

    loop {
        ticker.tick().await;

        match session_use_cases.purge_expired().await {
            Ok(0) => debug!("No expired refresh tokens"),
            Ok(removed) => info!(removed, "Purged expired refresh tokens"),
            Err(e) => error!(error = ?e, "Refresh token cleanup failed"),
        }
    }
}
