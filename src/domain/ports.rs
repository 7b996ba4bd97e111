use crate::domain::model::{OutputFormat, SortKey};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Byte-level access to wherever datasets are read from and written to.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> Option<&str>;
    fn filter_text(&self) -> Option<&str>;
    fn sort_key(&self) -> Option<SortKey>;
    fn output_path(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn monitoring_enabled(&self) -> bool;
}
