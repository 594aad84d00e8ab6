pub mod metrics;
pub mod record;
pub mod storage;

pub use metrics::CacheMetrics;
pub use record::CachedAnswer;
pub use storage::{DnsCache, DnsCacheConfig};
