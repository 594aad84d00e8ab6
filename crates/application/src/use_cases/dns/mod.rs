pub mod get_pending_stats;
pub mod route_query;
pub mod sweep_pending;

pub use get_pending_stats::{GetPendingStatsUseCase, PendingStats};
pub use route_query::{QueryRouter, RouteOutcome};
pub use sweep_pending::{SweepOutcome, SweepPendingQueriesUseCase};
