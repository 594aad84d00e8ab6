use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use relaydns_application::ports::{PendingQuery, PendingQueryTable};
use relaydns_domain::DomainError;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Upstream queries awaiting an answer, keyed by upstream transaction ID.
///
/// Insertion goes through the map's entry API and removal through
/// `remove`/`remove_if`, both of which hold the shard lock, so concurrent
/// handlers never both receive the same record.
///
/// `occupied` counts stored records plus slots reserved by an `add` that has
/// not inserted yet, so the capacity holds under concurrent adds.
pub struct InFlightTable {
    records: DashMap<u16, PendingQuery, FxBuildHasher>,
    occupied: AtomicUsize,
    capacity: usize,
}

impl InFlightTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: DashMap::with_capacity_and_hasher(
                capacity.min(u16::MAX as usize),
                FxBuildHasher,
            ),
            occupied: AtomicUsize::new(0),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn reserve_slot(&self) -> bool {
        self.occupied
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                (used < self.capacity).then_some(used + 1)
            })
            .is_ok()
    }

    fn release_slots(&self, count: usize) {
        if count > 0 {
            self.occupied.fetch_sub(count, Ordering::AcqRel);
        }
    }
}

impl PendingQueryTable for InFlightTable {
    fn add(&self, query: PendingQuery) -> Result<(), DomainError> {
        if !self.reserve_slot() {
            return Err(DomainError::PendingTableFull(self.capacity));
        }

        match self.records.entry(query.upstream_id) {
            Entry::Occupied(_) => {
                self.release_slots(1);
                Err(DomainError::DuplicateKey(query.upstream_id))
            }
            Entry::Vacant(slot) => {
                slot.insert(query);
                Ok(())
            }
        }
    }

    fn match_and_remove(&self, upstream_id: u16) -> Option<PendingQuery> {
        let (_, query) = self.records.remove(&upstream_id)?;
        self.release_slots(1);
        Some(query)
    }

    fn match_and_remove_if(
        &self,
        upstream_id: u16,
        predicate: &(dyn Fn(&PendingQuery) -> bool + Sync),
    ) -> Option<PendingQuery> {
        let (_, query) = self
            .records
            .remove_if(&upstream_id, |_, query| predicate(query))?;
        self.release_slots(1);
        Some(query)
    }

    fn sweep_expired(&self, max_age: Duration) -> Vec<PendingQuery> {
        let now = Instant::now();
        let is_expired =
            |query: &PendingQuery| now.saturating_duration_since(query.created_at) >= max_age;

        let candidates: Vec<u16> = self
            .records
            .iter()
            .filter(|entry| is_expired(entry.value()))
            .map(|entry| *entry.key())
            .collect();

        // A slot may have been answered and reused since the scan
        let expired: Vec<PendingQuery> = candidates
            .into_iter()
            .filter_map(|id| self.records.remove_if(&id, |_, query| is_expired(query)))
            .map(|(_, query)| query)
            .collect();
        self.release_slots(expired.len());

        if !expired.is_empty() {
            debug!(
                expired = expired.len(),
                remaining = self.records.len(),
                "Swept timed out pending queries"
            );
        }
        expired
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
