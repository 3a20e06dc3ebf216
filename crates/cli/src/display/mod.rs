pub mod formatter;

pub use formatter::{format_catalog, format_report, print_catalog, print_report};
