pub mod formatter;

pub use formatter::{CSV_HEADER, format_csv_line, format_json_line, format_plain_output};
