use relaydns_application::ports::TransactionIdSource;

/// Uniformly random upstream transaction IDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdSource;

impl TransactionIdSource for RandomIdSource {
    fn next_id(&self) -> u16 {
        fastrand::u16(..)
    }
}
