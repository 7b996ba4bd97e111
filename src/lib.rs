pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    engine::{RunSummary, SiftEngine},
    filter::filter_records,
    parse::{parse_bytes, parse_str},
    session::DataSession,
    sort::sort_records,
};
pub use domain::model::{Dataset, OutputFormat, Record, SortKey};
pub use utils::error::{Result, SiftError};
