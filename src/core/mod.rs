pub mod engine;
pub mod export;
pub mod filter;
pub mod parse;
pub mod session;
pub mod slice;
pub mod sort;

pub use crate::domain::model::{Dataset, OutputFormat, Record, SortKey};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
