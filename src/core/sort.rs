use crate::domain::model::{Dataset, Record, SortKey};
use serde_json::Value;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Returns `dataset` ordered ascending by `key`.
///
/// Whether the key applies is decided by the first record alone: when it has
/// no such member the input comes back unchanged. Records whose value cannot
/// be compared (missing, wrong type) go after all comparable ones, in their
/// original relative order.
pub fn sort_records(dataset: &Dataset, key: SortKey) -> Dataset {
    let Some(first) = dataset.first() else {
        return Dataset::default();
    };

    match resolve_key(first, key) {
        Some(SortKey::Id) => sorted_by(dataset, numeric_id, |a, b| a.total_cmp(b)),
        Some(SortKey::Name) => sorted_by(
            dataset,
            |r| r.field("name").and_then(Value::as_str),
            |a, b| locale_cmp(a, b),
        ),
        _ => {
            tracing::debug!("First record has no '{}' field, leaving order unchanged", key);
            dataset.clone()
        }
    }
}

/// The concrete key used for `requested`, judged on the first record.
pub fn resolve_key(first: &Record, requested: SortKey) -> Option<SortKey> {
    match requested {
        SortKey::Id if first.has_field("id") => Some(SortKey::Id),
        SortKey::Name if first.has_field("name") => Some(SortKey::Name),
        SortKey::Auto if first.has_field("id") => Some(SortKey::Id),
        SortKey::Auto if first.has_field("name") => Some(SortKey::Name),
        _ => None,
    }
}

fn sorted_by<'a, K, E, C>(dataset: &'a Dataset, extract: E, compare: C) -> Dataset
where
    E: Fn(&'a Record) -> Option<K>,
    C: Fn(&K, &K) -> Ordering,
{
    let mut keyed: Vec<(Option<K>, &Record)> = dataset.iter().map(|r| (extract(r), r)).collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

// numbers, or strings holding a number ("12" sorts as 12)
fn numeric_id(record: &Record) -> Option<f64> {
    match record.field("id")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        _ => None,
    }
}

/// Approximates a browser's default `localeCompare`: letters compare without
/// accents or case first, then accents break ties, then lowercase sorts
/// before uppercase. Precomposed and decomposed accents compare the same.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_form(a)
        .cmp(&primary_form(b))
        .then_with(|| secondary_form(a).cmp(&secondary_form(b)))
        .then_with(|| b.cmp(a))
}

// base letters only: NFD with combining marks removed, lowercased
fn primary_form(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn secondary_form(s: &str) -> String {
    s.nfd().collect::<String>().to_lowercase()
}
