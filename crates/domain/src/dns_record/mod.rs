pub mod record_class;
pub mod record_type;
pub mod response_code;

pub use record_class::RecordClass;
pub use record_type::RecordType;
pub use response_code::response_code_name;
