//! Output formatters for harvested records.
//!
//! Two views of the same record sequence: JSON keeps the structure
//! (categories as arrays), CSV flattens it for spreadsheets.

pub mod csv;
pub mod json;

pub use csv::{CsvConfig, records_to_csv};
pub use json::{JsonConfig, records_to_json};
