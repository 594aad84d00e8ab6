use relaydns_domain::{
    DnsMessage, Question, RecordData, RecordType, ResourceRecord, ResponseCode,
};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Raw query bytes built by hand, independent of the codec under test.
pub fn raw_query(id: u16, labels: &[&str], qtype: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&[0x01, 0x00]); // RD
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in labels {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
    buf.extend_from_slice(&qtype.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01]);
    buf
}

/// Response to `raw_query` with one compressed A record appended.
pub fn raw_a_response(id: u16, labels: &[&str], ttl: u32, ip: [u8; 4]) -> Vec<u8> {
    let mut buf = raw_query(id, labels, 1);
    buf[2] = 0x81;
    buf[3] = 0x80;
    buf[7] = 0x01; // ANCOUNT
    buf.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);
    buf.extend_from_slice(&ttl.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x04]);
    buf.extend_from_slice(&ip);
    buf
}

pub struct MessageBuilder {
    message: DnsMessage,
}

impl MessageBuilder {
    pub fn response(id: u16, domain: &str, record_type: RecordType) -> Self {
        let mut message =
            DnsMessage::response_to(id, Question::new(domain, record_type), ResponseCode::NoError);
        message.header.set_recursion_desired(true);
        Self { message }
    }

    pub fn rcode(mut self, code: ResponseCode) -> Self {
        self.message.header.set_response_code(code);
        self
    }

    pub fn truncated(mut self) -> Self {
        self.message.header.set_truncated(true);
        self
    }

    pub fn a(mut self, name: &str, ttl: u32, ip: [u8; 4]) -> Self {
        self.message
            .answers
            .push(ResourceRecord::a(name, ttl, Ipv4Addr::from(ip)));
        self
    }

    pub fn aaaa(mut self, name: &str, ttl: u32, ip: Ipv6Addr) -> Self {
        self.message.answers.push(ResourceRecord::aaaa(name, ttl, ip));
        self
    }

    pub fn cname(mut self, name: &str, ttl: u32, target: &str) -> Self {
        self.message
            .answers
            .push(ResourceRecord::cname(name, ttl, target));
        self
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.message.answers.push(record);
        self
    }

    pub fn authority(mut self, record: ResourceRecord) -> Self {
        self.message.authorities.push(record);
        self
    }

    pub fn additional(mut self, record: ResourceRecord) -> Self {
        self.message.additionals.push(record);
        self
    }

    pub fn build(self) -> DnsMessage {
        self.message
    }
}

pub fn soa(zone: &str, ttl: u32) -> ResourceRecord {
    ResourceRecord::new(
        zone,
        RecordType::SOA,
        ttl,
        RecordData::Soa {
            mname: format!("ns1.{}", zone),
            rname: format!("hostmaster.{}", zone),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1_209_600,
            minimum: 300,
        },
    )
}

pub fn opt(udp_size: u16) -> ResourceRecord {
    ResourceRecord {
        name: String::new(),
        record_type: RecordType::OPT,
        class: udp_size,
        ttl: 0,
        data: RecordData::Opaque(vec![]),
    }
}
