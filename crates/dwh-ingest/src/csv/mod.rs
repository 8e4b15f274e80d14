//! CSV reading utilities.

mod header;
mod reader;

pub use header::{check_header, normalize_header};
pub use reader::{read_staged, validate_encoding};
