use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Typed record data.
///
/// Addresses and the common name-bearing types get their own variant.
/// Everything else is kept as uncompressed RDATA bytes and written back
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// CNAME, NS or PTR: a single target name.
    Name(String),
    Mx {
        preference: u16,
        exchange: String,
    },
    Soa {
        mname: String,
        rname: String,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Opaque(Vec<u8>),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Name(target) => write!(f, "{}", Fqdn(target)),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, Fqdn(exchange)),
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{} {} {} {} {} {} {}",
                Fqdn(mname),
                Fqdn(rname),
                serial,
                refresh,
                retry,
                expire,
                minimum
            ),
            RecordData::Srv {
                priority,
                weight,
                port,
                target,
            } => write!(f, "{} {} {} {}", priority, weight, port, Fqdn(target)),
            RecordData::Opaque(bytes) => {
                // RFC 3597 generic encoding
                write!(f, "\\# {}", bytes.len())?;
                if !bytes.is_empty() {
                    write!(f, " ")?;
                    for b in bytes {
                        write!(f, "{:02x}", b)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Renders a stored name (no trailing dot, root is empty) as a fully
/// qualified presentation name.
pub(crate) struct Fqdn<'a>(pub &'a str);

impl fmt::Display for Fqdn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}.", self.0)
        }
    }
}
