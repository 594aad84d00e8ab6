use crate::dns_message::Question;
use crate::dns_record::RecordType;
use compact_str::CompactString;
use std::fmt;

/// Lookup key of the answer cache.
///
/// DNS names compare case-insensitively and `example.com.` is the same name as
/// `example.com`, so the domain is stored in one canonical spelling: ASCII
/// lowercase, no trailing dot, root as `"."`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: CompactString,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: normalize_domain(domain),
            record_type,
        }
    }

    #[inline]
    pub fn from_question(question: &Question) -> Self {
        Self::new(&question.name, question.record_type)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.record_type)
    }
}

pub fn normalize_domain(domain: &str) -> CompactString {
    let trimmed = strip_separator_dot(domain);
    if trimmed.is_empty() {
        return CompactString::from(".");
    }
    let mut normalized = CompactString::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        normalized.push(c.to_ascii_lowercase());
    }
    normalized
}

/// Removes one trailing dot unless it is escaped (`\.` is part of a label).
fn strip_separator_dot(domain: &str) -> &str {
    match domain.strip_suffix('.') {
        Some(rest) => {
            let backslashes = rest.bytes().rev().take_while(|&b| b == b'\\').count();
            if backslashes % 2 == 0 {
                rest
            } else {
                domain
            }
        }
        None => domain,
    }
}
