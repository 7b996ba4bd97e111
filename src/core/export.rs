use crate::domain::model::{Dataset, OutputFormat};
use crate::utils::error::{Result, SiftError};
use serde_json::Value;

const SCALAR_COLUMN: &str = "value";

pub fn export(dataset: &Dataset, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => export_json(dataset),
        OutputFormat::Csv => export_csv(dataset),
    }
}

/// Pretty-printed JSON array, two-space indent.
pub fn export_json(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(dataset)?;
    out.push(b'\n');
    Ok(out)
}

/// One row per record. Columns are the top-level keys of all object records
/// in first-seen order; non-object records land in a `value` column.
pub fn export_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let columns = columns(dataset);

    // records without any keys produce an empty file, not blank rows
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;

    for record in dataset {
        let row: Vec<String> = columns
            .iter()
            .map(|column| match &record.data {
                Value::Object(obj) => obj.get(column).map(cell).unwrap_or_default(),
                scalar if column == SCALAR_COLUMN => cell(scalar),
                _ => String::new(),
            })
            .collect();
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| SiftError::IoError(e.into_error()))
}

fn columns(dataset: &Dataset) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in dataset {
        match &record.data {
            Value::Object(obj) => {
                for key in obj.keys() {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
            }
            _ => {
                if !columns.iter().any(|c| c == SCALAR_COLUMN) {
                    columns.push(SCALAR_COLUMN.to_string());
                }
            }
        }
    }
    columns
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
