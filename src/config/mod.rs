pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{OutputFormat, SortKey};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_required_field,
    Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "json-sift")]
#[command(about = "Load a JSON file, filter and sort its records, and report timings")]
pub struct CliConfig {
    /// JSON file to load (array, or object whose values become the records)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Keep only records whose JSON text contains this, ignoring case
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sort key: auto, id or name
    #[arg(short, long)]
    pub sort: Option<SortKey>,

    /// Write the resulting records to this file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format; defaults to the output file extension
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// TOML config file; command line flags take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the resulting records to stdout
    #[arg(long)]
    pub print: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Fills every option not given on the command line from `file`.
    pub fn merge_file(&mut self, file: &TomlConfig) {
        if self.input.is_none() {
            self.input = file.input_path().map(str::to_string);
        }
        if self.filter.is_none() {
            self.filter = file.filter_text().map(str::to_string);
        }
        if self.sort.is_none() {
            self.sort = file.sort_key();
        }
        if self.output.is_none() {
            self.output = file.output_path().map(str::to_string);
            if self.format.is_none() && file.output.as_ref().is_some_and(|o| o.format.is_some()) {
                self.format = Some(file.output_format());
            }
        }
        self.monitor |= file.monitoring_enabled();
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn filter_text(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    fn sort_key(&self) -> Option<SortKey> {
        self.sort
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or_default()
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = validate_required_field("input", &self.input)?;
        validate_path("input", input)?;

        if let Some(filter) = &self.filter {
            validate_non_empty_string("filter", filter)?;
        }

        if let Some(output) = &self.output {
            validate_path("output", output)?;
            if self.format.is_none() {
                validate_file_extension("output", output, &["json", "csv"])?;
            }
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let config = CliConfig::parse_from([
            "json-sift", "--input", "cities.json", "--filter", "lima", "--sort", "name", "--output",
            "out.csv",
        ]);
        assert_eq!(config.input_path(), Some("cities.json"));
        assert_eq!(config.sort_key(), Some(SortKey::Name));
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_input_fails_validation() {
        let config = CliConfig::parse_from(["json-sift"]);
        assert!(matches!(
            config.validate(),
            Err(crate::utils::error::SiftError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_command_line_overrides_file() {
        let file = TomlConfig::from_str(
            "[input]\npath = \"file.json\"\n[sort]\nby = \"name\"\n[output]\npath = \"r.txt\"\nformat = \"csv\"\n[monitoring]\nenabled = true\n",
        )
        .unwrap();
        let mut config = CliConfig::parse_from(["json-sift", "--sort", "id"]);
        config.merge_file(&file);

        assert_eq!(config.input_path(), Some("file.json"));
        assert_eq!(config.sort_key(), Some(SortKey::Id));
        assert_eq!(config.output_path(), Some("r.txt"));
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }
}
