use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS packet: {0}")]
    MalformedPacket(String),

    #[error("Failed to encode DNS message: {0}")]
    EncodingError(String),

    #[error("Encoded message is {size} bytes, over the {limit} byte UDP limit")]
    MessageTooLarge { size: usize, limit: usize },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transaction ID {0:#06x} already has a query in flight")]
    DuplicateKey(u16),

    #[error("No free upstream transaction ID after {0} attempts")]
    TransactionIdsExhausted(usize),

    #[error("Pending query table is full ({0} queries in flight)")]
    PendingTableFull(usize),

    #[error("Upstream did not answer query {id:#06x} within {timeout_ms} ms")]
    UpstreamTimeout { id: u16, timeout_ms: u64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for errors caused by the size limit rather than by bad content.
    pub fn is_size_limit(&self) -> bool {
        matches!(self, DomainError::MessageTooLarge { .. })
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::IoError(err.to_string())
    }
}
