use super::record_data::Fqdn;
use super::{RecordData, RecordType};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,

    pub record_type: RecordType,

    pub class: u16,

    pub ttl: u32,

    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, record_type: RecordType, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: CLASS_IN,
            ttl,
            data,
        }
    }

    pub fn a(name: impl Into<String>, ttl: u32, addr: Ipv4Addr) -> Self {
        Self::new(name, RecordType::A, ttl, RecordData::A(addr))
    }

    pub fn aaaa(name: impl Into<String>, ttl: u32, addr: Ipv6Addr) -> Self {
        Self::new(name, RecordType::AAAA, ttl, RecordData::Aaaa(addr))
    }

    pub fn cname(name: impl Into<String>, ttl: u32, target: impl Into<String>) -> Self {
        Self::new(name, RecordType::CNAME, ttl, RecordData::Name(target.into()))
    }

    /// EDNS0 pseudo-records reuse CLASS and TTL for other purposes, so their
    /// TTL must never be treated as a lifetime.
    pub fn is_opt(&self) -> bool {
        self.record_type == RecordType::OPT
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            Fqdn(&self.name),
            self.ttl,
            ClassName(self.class),
            self.record_type,
            self.data
        )
    }
}

struct ClassName(u16);

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "IN"),
            3 => write!(f, "CH"),
            4 => write!(f, "HS"),
            other => write!(f, "CLASS{}", other),
        }
    }
}
