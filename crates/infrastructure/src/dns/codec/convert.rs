use hickory_proto::op::Query;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, NULL, PTR, SOA, SRV};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType as WireType};
use hickory_proto::serialize::binary::BinEncodable;
use relaydns_domain::{DomainError, Question, RecordData, RecordType, ResourceRecord};

use super::malformed;

/// Stored names carry no trailing dot and the root is the empty string.
/// ASCII forms on both sides keep the client's letter case and leave
/// punycode labels alone.
fn name_from_wire(name: &Name) -> String {
    if name.is_root() {
        return String::new();
    }
    let mut text = name.to_ascii();
    if text.ends_with('.') {
        text.pop();
    }
    text
}

fn name_to_wire(name: &str) -> Result<Name, DomainError> {
    if name.is_empty() || name == "." {
        return Ok(Name::root());
    }
    let parsed = if name.ends_with('.') {
        Name::from_ascii(name)
    } else {
        Name::from_ascii(format!("{}.", name))
    };
    parsed.map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", name, e)))
}

fn type_to_wire(record_type: RecordType) -> WireType {
    WireType::from(record_type.to_u16())
}

pub(super) fn question_from_wire(query: &Query) -> Question {
    Question {
        name: name_from_wire(query.name()),
        record_type: RecordType::from_u16(u16::from(query.query_type())),
        class: u16::from(query.query_class()),
    }
}

pub(super) fn question_to_wire(question: &Question) -> Result<Query, DomainError> {
    let mut query = Query::new();
    query.set_name(name_to_wire(&question.name)?);
    query.set_query_type(type_to_wire(question.record_type));
    query.set_query_class(DNSClass::from(question.class));
    Ok(query)
}

pub(super) fn section_from_wire(records: &[Record]) -> Result<Vec<ResourceRecord>, DomainError> {
    records.iter().map(record_from_wire).collect()
}

fn record_from_wire(record: &Record) -> Result<ResourceRecord, DomainError> {
    let data = match record.data() {
        RData::A(a) => RecordData::A(a.0),
        RData::AAAA(aaaa) => RecordData::Aaaa(aaaa.0),
        RData::CNAME(target) => RecordData::Name(name_from_wire(&target.0)),
        RData::NS(target) => RecordData::Name(name_from_wire(&target.0)),
        RData::PTR(target) => RecordData::Name(name_from_wire(&target.0)),
        RData::MX(mx) => RecordData::Mx {
            preference: mx.preference(),
            exchange: name_from_wire(mx.exchange()),
        },
        RData::SOA(soa) => RecordData::Soa {
            mname: name_from_wire(soa.mname()),
            rname: name_from_wire(soa.rname()),
            serial: soa.serial(),
            refresh: soa.refresh() as u32,
            retry: soa.retry() as u32,
            expire: soa.expire() as u32,
            minimum: soa.minimum(),
        },
        RData::SRV(srv) => RecordData::Srv {
            priority: srv.priority(),
            weight: srv.weight(),
            port: srv.port(),
            target: name_from_wire(srv.target()),
        },
        other => RecordData::Opaque(other.to_bytes().map_err(malformed)?),
    };

    Ok(ResourceRecord {
        name: name_from_wire(record.name()),
        record_type: RecordType::from_u16(u16::from(record.record_type())),
        class: u16::from(record.dns_class()),
        ttl: record.ttl(),
        data,
    })
}

pub(super) fn record_to_wire(record: &ResourceRecord) -> Result<Record, DomainError> {
    let rdata = match (&record.data, record.record_type) {
        (RecordData::A(addr), RecordType::A) => RData::A(A(*addr)),
        (RecordData::Aaaa(addr), RecordType::AAAA) => RData::AAAA(AAAA(*addr)),
        (RecordData::Name(target), RecordType::CNAME) => RData::CNAME(CNAME(name_to_wire(target)?)),
        (RecordData::Name(target), RecordType::NS) => RData::NS(NS(name_to_wire(target)?)),
        (RecordData::Name(target), RecordType::PTR) => RData::PTR(PTR(name_to_wire(target)?)),
        (
            RecordData::Mx {
                preference,
                exchange,
            },
            RecordType::MX,
        ) => RData::MX(MX::new(*preference, name_to_wire(exchange)?)),
        (
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            },
            RecordType::SOA,
        ) => RData::SOA(SOA::new(
            name_to_wire(mname)?,
            name_to_wire(rname)?,
            *serial,
            seconds(*refresh),
            seconds(*retry),
            seconds(*expire),
            *minimum,
        )),
        (
            RecordData::Srv {
                priority,
                weight,
                port,
                target,
            },
            RecordType::SRV,
        ) => RData::SRV(SRV::new(*priority, *weight, *port, name_to_wire(target)?)),
        (RecordData::Opaque(bytes), record_type) => RData::Unknown {
            code: type_to_wire(record_type),
            rdata: if bytes.is_empty() {
                NULL::new()
            } else {
                NULL::with(bytes.clone())
            },
        },
        (data, record_type) => {
            return Err(DomainError::EncodingError(format!(
                "{} record for {} cannot carry {:?}",
                record_type, record.name, data
            )))
        }
    };

    let mut wire = Record::from_rdata(name_to_wire(&record.name)?, record.ttl, rdata);
    wire.set_dns_class(DNSClass::from(record.class));
    Ok(wire)
}

/// Converts an SOA timer into the integer type `SOA::new` takes.
fn seconds<T: TryFrom<u32> + Default>(value: u32) -> T {
    T::try_from(value).unwrap_or_default()
}
