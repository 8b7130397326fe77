pub mod dates;
pub mod fields;
pub mod import;
pub mod records;
pub mod security;
pub mod seed;
pub mod tables;
pub mod templates;
pub mod upsert;

pub use fields::{lookup, split_comma_list};
pub use records::{read_all, read_all_as, read_in, read_in_as, Record, RecordKind};
pub use upsert::upsert;
