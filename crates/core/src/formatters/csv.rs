//! CSV output formatter.
//!
//! Renders the flat view: one row per record, `categories` joined into a
//! single cell. Quoting is minimal, applied only to fields that contain the
//! separator, a quote, or a line break.

use crate::exhibitor::{Exhibitor, FLAT_COLUMNS};

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field separator.
    pub separator: char,

    /// Emit the header row.
    pub headers: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { separator: ',', headers: true }
    }
}

/// Renders records as CSV in [`FLAT_COLUMNS`] order.
///
/// An empty record slice still renders the header row when enabled; callers
/// that want no file at all for empty harvests decide that themselves.
pub fn records_to_csv(records: &[Exhibitor], config: &CsvConfig) -> String {
    let mut out = String::new();
    if config.headers {
        write_row(&mut out, &FLAT_COLUMNS, config.separator);
    }

    for record in records {
        let flat = record.flatten();
        let featured = flat.featured.to_string();
        let fields = [
            flat.name.as_str(),
            flat.profile_url.as_str(),
            flat.booth.as_str(),
            flat.city.as_str(),
            flat.state.as_str(),
            flat.country.as_str(),
            flat.description.as_str(),
            featured.as_str(),
            flat.categories.as_str(),
        ];
        write_row(&mut out, &fields, config.separator);
    }
    out
}

fn write_row(out: &mut String, fields: &[&str], separator: char) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(separator);
        }
        first = false;

        if needs_quotes(field, separator) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

fn needs_quotes(field: &str, separator: char) -> bool {
    field.contains(separator) || field.contains('"') || field.contains('\n') || field.contains('\r')
}
