pub mod cache_sweep;
pub mod pending_sweep;
pub mod runner;

pub use cache_sweep::CacheSweepJob;
pub use pending_sweep::PendingSweepJob;
pub use runner::JobRunner;
