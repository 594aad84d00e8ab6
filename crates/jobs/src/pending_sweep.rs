use relaydns_application::use_cases::SweepPendingQueriesUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_INTERVAL_SECS: u64 = 1;

/// Periodically abandons forwarded queries the upstream never answered.
pub struct PendingSweepJob {
    sweep: Arc<SweepPendingQueriesUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl PendingSweepJob {
    pub fn new(sweep: Arc<SweepPendingQueriesUseCase>) -> Self {
        Self {
            sweep,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting pending query sweep job");

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("PendingSweepJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let outcome = self.sweep.execute().await;
                    if outcome.expired > 0 {
                        debug!(
                            expired = outcome.expired,
                            servfail_sent = outcome.servfail_sent,
                            remaining = outcome.remaining,
                            "Pending query sweep completed"
                        );
                    }
                }
            }
        }
    }
}
