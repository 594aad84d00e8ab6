pub mod cache;
pub mod health;
pub mod pending;

pub use cache::{get_cache_entries, get_cache_metrics};
pub use health::health_check;
pub use pending::get_pending;
