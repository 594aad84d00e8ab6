//! Wire format adapter over `hickory-proto`.
//!
//! hickory parses and emits the bytes; this module maps its `Message` to and
//! from the domain's `DnsMessage`. The header flag word is copied verbatim in
//! both directions so bits hickory models differently (Z, AD, CD) survive.

mod convert;

use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder, BinEncodable, BinEncoder};
use relaydns_application::ports::MessageCodec;
use relaydns_domain::dns_message::HEADER_LEN;
use relaydns_domain::{DnsMessage, DomainError, MessageHeader, MAX_UDP_PAYLOAD};

fn malformed(reason: impl std::fmt::Display) -> DomainError {
    DomainError::MalformedPacket(reason.to_string())
}

/// Codec for plain UDP DNS: no EDNS0 size negotiation, 512-byte messages.
///
/// OPT pseudo-records are not carried across: hickory lifts them out of the
/// additional section on decode and they are skipped on encode.
#[derive(Debug, Default, Clone, Copy)]
pub struct WireCodec;

impl WireCodec {
    pub fn new() -> Self {
        Self
    }
}

impl MessageCodec for WireCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        if bytes.len() < HEADER_LEN {
            return Err(malformed("shorter than a DNS header"));
        }

        let mut decoder = BinDecoder::new(bytes);
        let message = Message::read(&mut decoder).map_err(malformed)?;
        if !decoder.is_empty() {
            return Err(malformed("trailing bytes after the last record"));
        }

        let id = u16::from_be_bytes([bytes[0], bytes[1]]);
        let flags = u16::from_be_bytes([bytes[2], bytes[3]]);

        Ok(DnsMessage {
            header: MessageHeader::from_wire(id, flags),
            questions: message.queries().iter().map(convert::question_from_wire).collect(),
            answers: convert::section_from_wire(message.answers())?,
            authorities: convert::section_from_wire(message.name_servers())?,
            additionals: convert::section_from_wire(message.additionals())?,
        })
    }

    fn encode(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        let mut wire = Message::new(message.header.id, MessageType::Query, OpCode::Query);

        for question in &message.questions {
            wire.add_query(convert::question_to_wire(question)?);
        }
        for record in message.answers.iter().filter(|r| !r.is_opt()) {
            wire.add_answer(convert::record_to_wire(record)?);
        }
        for record in message.authorities.iter().filter(|r| !r.is_opt()) {
            wire.add_name_server(convert::record_to_wire(record)?);
        }
        for record in message.additionals.iter().filter(|r| !r.is_opt()) {
            wire.add_additional(convert::record_to_wire(record)?);
        }

        let mut buf = Vec::with_capacity(MAX_UDP_PAYLOAD);
        let mut encoder = BinEncoder::new(&mut buf);
        wire.emit(&mut encoder)
            .map_err(|e| DomainError::EncodingError(e.to_string()))?;

        if buf.len() > MAX_UDP_PAYLOAD {
            return Err(DomainError::MessageTooLarge {
                size: buf.len(),
                limit: MAX_UDP_PAYLOAD,
            });
        }

        buf[2..4].copy_from_slice(&message.header.wire_flags().to_be_bytes());
        Ok(buf)
    }
}
