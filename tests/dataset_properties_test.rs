use anyhow::Result;
use json_sift::{filter_records, parse_str, sort_records, Dataset, SortKey};
use serde_json::json;

#[test]
fn test_array_document_keeps_order() -> Result<()> {
    let dataset = parse_str(r#"[{"id":2,"name":"b"},{"id":1,"name":"a"},{"other":true}]"#)?;
    assert_eq!(
        dataset.to_value(),
        json!([{"id": 2, "name": "b"}, {"id": 1, "name": "a"}, {"other": true}])
    );
    Ok(())
}

#[test]
fn test_object_document_yields_values() -> Result<()> {
    let dataset = parse_str(r#"{"a":{"id":1},"b":{"id":2}}"#)?;
    assert_eq!(dataset.to_value(), json!([{"id": 1}, {"id": 2}]));
    Ok(())
}

#[test]
fn test_filter_by_digit() -> Result<()> {
    let dataset = parse_str(r#"[{"id":1},{"id":2},{"id":12}]"#)?;
    let filtered = filter_records(&dataset, "2");
    assert_eq!(filtered.to_value(), json!([{"id": 2}, {"id": 12}]));
    Ok(())
}

#[test]
fn test_filter_ignores_case() -> Result<()> {
    let dataset = parse_str(r#"[{"name":"Foo"}]"#)?;
    assert_eq!(filter_records(&dataset, "foo").len(), 1);
    Ok(())
}

#[test]
fn test_sort_by_id_and_name() -> Result<()> {
    let ids = parse_str(r#"[{"id":3},{"id":1},{"id":2}]"#)?;
    assert_eq!(
        sort_records(&ids, SortKey::Id).to_value(),
        json!([{"id": 1}, {"id": 2}, {"id": 3}])
    );

    let names = parse_str(r#"[{"name":"b"},{"name":"a"}]"#)?;
    assert_eq!(
        sort_records(&names, SortKey::Name).to_value(),
        json!([{"name": "a"}, {"name": "b"}])
    );
    Ok(())
}

#[test]
fn test_sort_without_keys_is_unchanged() -> Result<()> {
    let dataset = parse_str(r#"[{"x":3},{"x":1},{"x":2}]"#)?;
    for key in [SortKey::Auto, SortKey::Id, SortKey::Name] {
        assert_eq!(sort_records(&dataset, key), dataset);
    }
    Ok(())
}

#[test]
fn test_empty_dataset_operations() {
    let empty = Dataset::default();
    assert!(filter_records(&empty, "anything").is_empty());
    assert!(sort_records(&empty, SortKey::Auto).is_empty());
}

#[test]
fn test_filter_then_sort_cities() -> Result<()> {
    let dataset = parse_str(
        r#"[
            {"id": 4, "name": "Málaga", "country": "ES"},
            {"id": 1, "name": "Madrid", "country": "ES"},
            {"id": 3, "name": "Lima", "country": "PE"},
            {"id": 2, "name": "marbella", "country": "ES"}
        ]"#,
    )?;

    let spanish = filter_records(&dataset, "es");
    assert_eq!(spanish.len(), 3);

    let by_name = sort_records(&spanish, SortKey::Name);
    let names: Vec<&str> = by_name
        .iter()
        .filter_map(|r| r.field("name").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(names, vec!["Madrid", "Málaga", "marbella"]);
    Ok(())
}
