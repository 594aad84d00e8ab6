use relaydns_domain::{
    DnsMessage, Question, RecordData, RecordType, ResourceRecord, ResponseCode,
};
use std::net::{Ipv4Addr, SocketAddr};

pub const UPSTREAM: &str = "198.51.100.53:53";

pub fn upstream_addr() -> SocketAddr {
    UPSTREAM.parse().unwrap()
}

pub fn client_addr(last_octet: u8, port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::new(192, 0, 2, last_octet), port))
}

pub fn query(id: u16, domain: &str, record_type: RecordType) -> DnsMessage {
    DnsMessage::query(id, Question::new(domain, record_type))
}

pub fn a_answer(id: u16, domain: &str, ttl: u32, ips: &[[u8; 4]]) -> DnsMessage {
    let mut message =
        DnsMessage::response_to(id, Question::new(domain, RecordType::A), ResponseCode::NoError);
    message.header.set_recursion_desired(true);
    for ip in ips {
        message
            .answers
            .push(ResourceRecord::a(domain, ttl, Ipv4Addr::from(*ip)));
    }
    message
}

pub fn opt_record() -> ResourceRecord {
    ResourceRecord {
        name: String::new(),
        record_type: RecordType::OPT,
        class: 1232,
        ttl: 0,
        data: RecordData::Opaque(vec![]),
    }
}
