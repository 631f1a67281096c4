pub mod sort;

pub use sort::{compare_names, get_sorted_data};

use crate::records::{CountTable, FilterSelection, Record, RecordField};
use crate::utils::sanitize_input;

pub fn get_counts(records: &[Record], key: RecordField) -> CountTable {
    records.iter().fold(CountTable::new(), |mut acc, record| {
        acc.increment(record.field(key));
        acc
    })
}

/// Keeps the records whose country and industry match the selection.
///
/// An empty selection matches everything. Matching is exact and
/// case-insensitive, compared on the sanitized text.
pub fn get_filtered_data(records: &[Record], selection: &FilterSelection) -> Vec<Record> {
    let country = normalized_selection(selection.country.as_deref());
    let industry = normalized_selection(selection.industry.as_deref());

    records
        .iter()
        .filter(|r| field_matches(&r.country, country.as_deref()))
        .filter(|r| field_matches(&r.industry, industry.as_deref()))
        .cloned()
        .collect()
}

fn normalized_selection(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| sanitize_input(v).to_lowercase())
}

fn field_matches(value: &str, selected: Option<&str>) -> bool {
    match selected {
        None => true,
        Some(selected) => sanitize_input(value).to_lowercase() == selected,
    }
}
