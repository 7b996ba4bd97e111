use crate::core::{export::export_json, parse::parse_bytes};
use crate::domain::model::Dataset;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::timing::measure;
use crate::utils::validation::validate_positive_number;
use std::path::{Path, PathBuf};

/// One file produced by [`write_slices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSlice {
    pub path: String,
    pub requested: usize,
    pub records: usize,
}

/// First `n` records of `dataset`, or all of them when it is shorter.
pub fn head(dataset: &Dataset, n: usize) -> Dataset {
    dataset.iter().take(n).cloned().collect()
}

/// `<dir>/<stem>-<n>.json` for an input like `assets/cities.json`.
pub fn slice_path(input: &Path, output_dir: Option<&Path>, n: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}-{}.json", stem, n))
}

/// Reads `input` and writes its first `n` records to `<stem>-<n>.json` for
/// every `n` in `sizes`, into `output_dir` or next to the input.
pub async fn write_slices<S: Storage>(
    storage: &S,
    input: &str,
    sizes: &[usize],
    output_dir: Option<&str>,
) -> Result<Vec<WrittenSlice>> {
    validate_positive_number("sizes", sizes.len(), 1)?;
    for &size in sizes {
        validate_positive_number("sizes", size, 1)?;
    }

    let bytes = storage.read_file(input).await?;
    let (dataset, parse_ms) = measure(|| parse_bytes(&bytes));
    let dataset = dataset?;
    tracing::info!("Parsed {} records in {:.3} ms", dataset.len(), parse_ms);

    let mut written = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let path = slice_path(Path::new(input), output_dir.map(Path::new), size)
            .to_string_lossy()
            .into_owned();
        let part = head(&dataset, size);
        if part.len() < size {
            tracing::warn!("Only {} records available for slice of {}", part.len(), size);
        }
        storage.write_file(&path, &export_json(&part)?).await?;
        tracing::debug!("Wrote {} records to {}", part.len(), path);
        written.push(WrittenSlice {
            path,
            requested: size,
            records: part.len(),
        });
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_head_truncates_and_keeps_order() {
        let data = Dataset::from(vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
        assert_eq!(head(&data, 2).to_value(), json!([{"id": 1}, {"id": 2}]));
        assert_eq!(head(&data, 10), data);
        assert!(head(&data, 0).is_empty());
    }

    #[test]
    fn test_slice_path_naming() {
        let input = Path::new("src/assets/cities.json");
        assert_eq!(slice_path(input, None, 100), PathBuf::from("src/assets/cities-100.json"));
        assert_eq!(
            slice_path(input, Some(Path::new("out")), 1000),
            PathBuf::from("out/cities-1000.json")
        );
    }
}
