use relaydns_domain::{DnsMessage, DomainError};

/// Conversion between raw UDP payloads and structured messages.
pub trait MessageCodec: Send + Sync {
    /// Fails with `MalformedPacket` on anything that is not a well-formed message.
    fn decode(&self, bytes: &[u8]) -> Result<DnsMessage, DomainError>;

    /// Fails with `MessageTooLarge` when the result would not fit one UDP datagram.
    fn encode(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError>;
}
