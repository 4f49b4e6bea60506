pub mod record;

pub use record::{load_records, parse_record, read_records, xor_samples, Sample};
