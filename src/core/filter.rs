use crate::domain::model::{Dataset, Record};

/// Keeps the records whose compact JSON form contains `filter`, ignoring case.
///
/// An empty filter keeps everything. Blank filters are rejected one level up,
/// in the session, before this is ever called.
pub fn filter_records(dataset: &Dataset, filter: &str) -> Dataset {
    if filter.is_empty() {
        return dataset.clone();
    }

    let needle = filter.to_lowercase();
    dataset
        .iter()
        .filter(|record| matches(record, &needle))
        .cloned()
        .collect()
}

fn matches(record: &Record, needle: &str) -> bool {
    record.data.to_string().to_lowercase().contains(needle)
}
