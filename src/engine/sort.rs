use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::records::{Record, SortField, SortOrder, SortSelection};

/// Primary collation key: decomposed, accents dropped, lowercased.
fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-style ordering that ignores case and accents at the first level.
///
/// Names equal under folding fall back to their lowercased form, so the
/// unaccented spelling comes first, then to the raw text, so that distinct
/// names never compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Returns the records ordered by the selection.
///
/// Records with equal keys keep their input order in both directions.
pub fn get_sorted_data(records: &[Record], sort: SortSelection) -> Vec<Record> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let ord = match sort.field {
            SortField::Name => compare_names(&a.name, &b.name),
            SortField::EmployeeCount => a.number_of_employees.cmp(&b.number_of_employees),
        };
        match sort.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    out
}
