pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Column order for repayment plan rows; serde_json maps sort their keys.
pub const SCHEDULE_COLUMNS: [&str; 8] = [
    "installment_number",
    "payment_date",
    "payment_amount",
    "income_amount",
    "net_payment_amount",
    "interest_amount",
    "principal_amount",
    "remaining_balance",
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Headers for an array of row objects, using the plan column order when
/// the rows look like installments.
pub fn row_headers(first: &Map<String, Value>) -> Vec<String> {
    if SCHEDULE_COLUMNS.iter().all(|c| first.contains_key(*c)) {
        SCHEDULE_COLUMNS.iter().map(|c| c.to_string()).collect()
    } else {
        first.keys().cloned().collect()
    }
}

/// The first field of `map` holding a non-empty array of objects.
pub fn find_rows(map: &Map<String, Value>) -> Option<(&str, &[Value])> {
    map.iter().find_map(|(key, val)| match val {
        Value::Array(arr) if arr.first().is_some_and(Value::is_object) => {
            Some((key.as_str(), arr.as_slice()))
        }
        _ => None,
    })
}
