/// Source of fresh upstream transaction IDs, used when the client's own ID is
/// already in flight.
pub trait TransactionIdSource: Send + Sync {
    fn next_id(&self) -> u16;
}
