#![allow(dead_code)]
use relaydns_domain::{DnsMessage, Question, RecordType, ResourceRecord, ResponseCode};
use std::net::Ipv4Addr;

pub struct AnswerBuilder {
    message: DnsMessage,
}

impl AnswerBuilder {
    pub fn new(id: u16, domain: &str, record_type: RecordType) -> Self {
        Self {
            message: DnsMessage::response_to(
                id,
                Question::new(domain, record_type),
                ResponseCode::NoError,
            ),
        }
    }

    pub fn with_a(mut self, domain: &str, ttl: u32, ip: [u8; 4]) -> Self {
        self.message
            .answers
            .push(ResourceRecord::a(domain, ttl, Ipv4Addr::from(ip)));
        self
    }

    pub fn with_authority(mut self, record: ResourceRecord) -> Self {
        self.message.authorities.push(record);
        self
    }

    pub fn with_additional(mut self, record: ResourceRecord) -> Self {
        self.message.additionals.push(record);
        self
    }

    pub fn build(self) -> DnsMessage {
        self.message
    }
}
