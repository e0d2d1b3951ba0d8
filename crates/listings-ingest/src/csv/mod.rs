//! CSV reading and writing.

mod reader;
mod writer;

pub use reader::{MAX_CSV_FILE_SIZE, check_file_size, read_listings_csv};
pub use writer::write_listings_csv;
