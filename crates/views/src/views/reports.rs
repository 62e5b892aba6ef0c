//! Generic report table.

use serde_json::{Map, Value};

const EMPTY_MESSAGE: &str = "No data found for the selected report.";

/// A table built from arbitrary report records.
///
/// Headers are the keys of the first record in server order; every record
/// contributes one row of its values in its own key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl ReportTable {
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let headers = records
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default();
        let rows = records
            .iter()
            .map(|record| record.values().map(cell_text).collect())
            .collect();
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn empty_message(&self) -> &'static str {
        EMPTY_MESSAGE
    }
}
