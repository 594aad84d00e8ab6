pub mod cache;
pub mod codec;
pub mod pending;
pub mod server;
pub mod transaction_ids;
pub mod transport;

pub use cache::{CacheMetrics, DnsCache, DnsCacheConfig};
pub use codec::WireCodec;
pub use pending::InFlightTable;
pub use server::DnsServer;
pub use transaction_ids::RandomIdSource;
pub use transport::UdpTransport;
