mod answer_cache;
mod datagram_transport;
mod message_codec;
mod pending_query_table;
mod transaction_id_source;

pub use answer_cache::{
    AnswerCache, CacheEntrySnapshot, CacheMetricsSnapshot, CachePutOutcome, CacheSkipReason,
};
pub use datagram_transport::{Datagram, DatagramTransport};
pub use message_codec::MessageCodec;
pub use pending_query_table::{PendingQuery, PendingQueryTable};
pub use transaction_id_source::TransactionIdSource;
