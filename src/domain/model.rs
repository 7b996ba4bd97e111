use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One element of a dataset. Usually a JSON object, but no schema is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Value,
}

impl Record {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Member `name` when the record is an object that has it.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.as_object().and_then(|obj| obj.get(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

impl From<Value> for Record {
    fn from(data: Value) -> Self {
        Self { data }
    }
}

/// Ordered, in-memory list of records. Operations produce new datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.records.iter().map(|r| r.data.clone()).collect())
    }
}

impl From<Vec<Value>> for Dataset {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Record::new).collect())
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// `id` when the first record has one, otherwise `name`.
    Auto,
    #[default]
    Id,
    Name,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SortKey::Auto),
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            other => Err(format!("unknown sort key '{}', expected auto, id or name", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Auto => "auto",
            SortKey::Id => "id",
            SortKey::Name => "name",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Format implied by a file extension, if recognized.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = std::path::Path::new(path).extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{}', expected json or csv", other)),
        }
    }
}
