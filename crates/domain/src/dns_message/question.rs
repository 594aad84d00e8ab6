use crate::dns_record::resource_record::CLASS_IN;
use crate::dns_record::RecordType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Presentation form without the trailing dot; the root is `""`.
    pub name: String,
    pub record_type: RecordType,
    pub class: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: CLASS_IN,
        }
    }
}
