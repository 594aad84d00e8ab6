//! relaydns domain layer
pub mod cache_key;
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;

pub use cache_key::CacheKey;
pub use config::{CliOverrides, Config};
pub use dns_message::{DnsMessage, MessageHeader, Question, ResponseCode, MAX_UDP_PAYLOAD};
pub use dns_record::{RecordData, RecordType, ResourceRecord};
pub use errors::DomainError;
