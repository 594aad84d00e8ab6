pub mod header;
pub mod question;

pub use header::{MessageHeader, ResponseCode};
pub use question::Question;

use crate::dns_record::ResourceRecord;

/// Largest DNS payload carried over UDP without EDNS0 (RFC 1035 §4.2.1).
pub const MAX_UDP_PAYLOAD: usize = 512;

/// Fixed size of the message header on the wire.
pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsMessage {
    pub header: MessageHeader,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl DnsMessage {
    /// A recursive query with a single question.
    pub fn query(id: u16, question: Question) -> Self {
        let mut header = MessageHeader::new(id);
        header.set_recursion_desired(true);
        Self {
            header,
            questions: vec![question],
            ..Default::default()
        }
    }

    /// A response echoing `question`, with no records.
    pub fn response_to(id: u16, question: Question, code: ResponseCode) -> Self {
        let mut header = MessageHeader::new(id);
        header.is_response = true;
        header.set_recursion_available(true);
        header.set_response_code(code);
        Self {
            header,
            questions: vec![question],
            ..Default::default()
        }
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn is_response(&self) -> bool {
        self.header.is_response
    }

    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Smallest TTL across the answer section, `None` when it is empty.
    pub fn min_answer_ttl(&self) -> Option<u32> {
        self.answers.iter().map(|r| r.ttl).min()
    }

    /// Drops EDNS0 OPT pseudo-records from the additional section.
    pub fn strip_edns(&mut self) {
        self.additionals.retain(|r| !r.is_opt());
    }

    /// Lowers every record TTL by `elapsed_secs`, saturating at zero.
    /// OPT records are left alone since their TTL field carries flags.
    pub fn age_ttls(&mut self, elapsed_secs: u32) {
        for record in self
            .answers
            .iter_mut()
            .chain(self.authorities.iter_mut())
            .chain(self.additionals.iter_mut())
            .filter(|r| !r.is_opt())
        {
            record.ttl = record.ttl.saturating_sub(elapsed_secs);
        }
    }

    /// Header and question only, with TC set: what a UDP server sends when
    /// the full answer does not fit.
    pub fn truncated_copy(&self) -> Self {
        let mut header = self.header;
        header.set_truncated(true);
        Self {
            header,
            questions: self.questions.clone(),
            ..Default::default()
        }
    }
}
