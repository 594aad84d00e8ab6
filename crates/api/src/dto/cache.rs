use relaydns_application::ports::{CacheEntrySnapshot, CacheMetricsSnapshot};
use serde::Serialize;

/// One cached answer; `answers` holds the records in presentation form.
#[derive(Serialize, Debug, Clone)]
pub struct CacheEntryResponse {
    pub domain: String,
    pub record_type: String,
    pub remaining_ttl: u32,
    pub answers: Vec<String>,
}

impl From<CacheEntrySnapshot> for CacheEntryResponse {
    fn from(entry: CacheEntrySnapshot) -> Self {
        Self {
            domain: entry.key.domain.to_string(),
            record_type: entry.key.record_type.to_string(),
            remaining_ttl: entry.remaining_ttl,
            answers: entry.answers.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CacheMetricsResponse {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub skipped: u64,
    pub hit_rate: f64,
}

impl From<CacheMetricsSnapshot> for CacheMetricsResponse {
    fn from(snapshot: CacheMetricsSnapshot) -> Self {
        Self {
            total_entries: snapshot.total_entries,
            hits: snapshot.hits,
            misses: snapshot.misses,
            insertions: snapshot.insertions,
            evictions: snapshot.evictions,
            expirations: snapshot.expirations,
            skipped: snapshot.skipped,
            hit_rate: snapshot.hit_rate,
        }
    }
}
