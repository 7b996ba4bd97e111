use anyhow::Result;
use json_sift::core::export::export_json;
use json_sift::core::slice::{write_slices, WrittenSlice};
use json_sift::domain::ports::Storage;
use json_sift::{parse_bytes, Dataset, LocalStorage, SiftError};
use serde_json::json;
use tempfile::TempDir;

async fn seed_cities(storage: &LocalStorage, path: &str, count: i64) -> Result<()> {
    let cities: Vec<serde_json::Value> = (1..=count)
        .map(|i| json!({"id": i, "name": format!("City {}", i)}))
        .collect();
    storage
        .write_file(path, &export_json(&Dataset::from(cities))?)
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_slices_written_next_to_input() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());
    seed_cities(&storage, "assets/cities.json", 25).await?;

    let slices = write_slices(&storage, "assets/cities.json", &[10, 100], None).await?;

    assert_eq!(
        slices,
        vec![
            WrittenSlice {
                path: "assets/cities-10.json".to_string(),
                requested: 10,
                records: 10,
            },
            WrittenSlice {
                path: "assets/cities-100.json".to_string(),
                requested: 100,
                records: 25,
            },
        ]
    );

    let ten = parse_bytes(&std::fs::read(temp_dir.path().join("assets/cities-10.json"))?)?;
    assert_eq!(ten.len(), 10);
    assert_eq!(ten.first().unwrap().field("id"), Some(&json!(1)));

    let source = parse_bytes(&std::fs::read(temp_dir.path().join("assets/cities.json"))?)?;
    let hundred = parse_bytes(&std::fs::read(temp_dir.path().join("assets/cities-100.json"))?)?;
    assert_eq!(hundred, source);
    Ok(())
}

#[tokio::test]
async fn test_slices_go_to_output_dir() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());
    seed_cities(&storage, "cities.json", 5).await?;

    let slices = write_slices(&storage, "cities.json", &[2], Some("slices")).await?;
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].path, "slices/cities-2.json");

    let two = parse_bytes(&std::fs::read(temp_dir.path().join("slices/cities-2.json"))?)?;
    assert_eq!(two.to_value(), json!([{"id": 1, "name": "City 1"}, {"id": 2, "name": "City 2"}]));
    assert!(!temp_dir.path().join("cities-2.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_zero_or_missing_sizes_are_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());
    seed_cities(&storage, "cities.json", 3).await?;

    let err = write_slices(&storage, "cities.json", &[10, 0], None)
        .await
        .unwrap_err();
    assert!(matches!(err, SiftError::InvalidConfigValueError { .. }));
    assert!(!temp_dir.path().join("cities-10.json").exists());

    let err = write_slices(&storage, "cities.json", &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, SiftError::InvalidConfigValueError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_invalid_source_is_parse_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());
    storage.write_file("broken.json", b"[1,").await?;

    let err = write_slices(&storage, "broken.json", &[1], None)
        .await
        .unwrap_err();
    assert!(matches!(err, SiftError::ParseError { .. }));
    Ok(())
}
