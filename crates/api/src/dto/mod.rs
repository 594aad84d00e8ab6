pub mod cache;
pub mod health;
pub mod pending;

pub use cache::{CacheEntryResponse, CacheMetricsResponse};
pub use health::HealthResponse;
pub use pending::PendingResponse;
