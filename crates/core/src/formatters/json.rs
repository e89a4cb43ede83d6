//! JSON output formatter.
//!
//! Renders the structured view: records serialize with their field order
//! intact and `categories` as a proper array.

use crate::Result;
use crate::error::ExpositorError;
use crate::exhibitor::Exhibitor;

/// Configuration for JSON output.
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Pretty-print with two-space indentation.
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Renders records as a JSON array.
pub fn records_to_json(records: &[Exhibitor], config: &JsonConfig) -> Result<String> {
    let rendered = if config.pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    };
    rendered.map_err(|e| ExpositorError::Serialize(e.to_string()))
}
