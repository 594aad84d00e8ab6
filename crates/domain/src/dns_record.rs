pub mod record_data;
pub mod record_type;
pub mod resource_record;

pub use record_data::RecordData;
pub use record_type::RecordType;
pub use resource_record::ResourceRecord;
