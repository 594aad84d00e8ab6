use relaydns_application::use_cases::PendingStats;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct PendingResponse {
    pub in_flight: usize,
}

impl From<PendingStats> for PendingResponse {
    fn from(stats: PendingStats) -> Self {
        Self {
            in_flight: stats.in_flight,
        }
    }
}
