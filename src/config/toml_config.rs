use crate::domain::model::{OutputFormat, SortKey};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SiftError};
use crate::utils::logger::LOG_LEVELS;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    pub filter: Option<FilterConfig>,
    pub sort: Option<SortConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub by: SortKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SiftError::config(format!(
                "cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref()?.log_level.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.path.as_deref()
    }

    fn filter_text(&self) -> Option<&str> {
        self.filter.as_ref().map(|f| f.text.as_str())
    }

    fn sort_key(&self) -> Option<SortKey> {
        self.sort.as_ref().map(|s| s.by)
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }

    fn output_format(&self) -> OutputFormat {
        let Some(output) = &self.output else {
            return OutputFormat::default();
        };
        output
            .format
            .or_else(|| OutputFormat::from_path(&output.path))
            .unwrap_or_default()
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.input.path {
            validate_path("input.path", path)?;
        }
        if let Some(filter) = &self.filter {
            validate_non_empty_string("filter.text", &filter.text)?;
        }
        if let Some(output) = &self.output {
            validate_path("output.path", &output.path)?;
            if output.format.is_none() {
                validate_file_extension("output.path", &output.path, &["json", "csv"])?;
            }
        }
        if let Some(level) = self.log_level() {
            if !LOG_LEVELS.contains(&level.trim().to_ascii_lowercase().as_str()) {
                return Err(SiftError::InvalidConfigValueError {
                    field: "monitoring.log_level".to_string(),
                    value: level.to_string(),
                    reason: format!("Expected one of: {}", LOG_LEVELS.join(", ")),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let config = TomlConfig::from_str(
            r#"
[input]
path = "cities.json"

[filter]
text = "madrid"

[sort]
by = "name"

[output]
path = "out/result.csv"

[monitoring]
enabled = true
log_level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.input_path(), Some("cities.json"));
        assert_eq!(config.filter_text(), Some("madrid"));
        assert_eq!(config.sort_key(), Some(SortKey::Name));
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(config.monitoring_enabled());
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_str("").unwrap();
        assert!(config.input_path().is_none());
        assert!(config.sort_key().is_none());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_filter_fails_validation() {
        let config = TomlConfig::from_str("[filter]\ntext = \"   \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_names_the_field() {
        let config = TomlConfig::from_str("[monitoring]\nenabled = false\nlog_level = \"loud\"\n").unwrap();
        match config.validate() {
            Err(SiftError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "monitoring.log_level")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_sort_key_is_toml_error() {
        let err = TomlConfig::from_str("[sort]\nby = \"date\"\n").unwrap_err();
        assert!(matches!(err, SiftError::TomlError(_)));
    }

    #[test]
    fn test_output_extension_checked_without_explicit_format() {
        let bad = TomlConfig::from_str("[output]\npath = \"out.txt\"\n").unwrap();
        assert!(bad.validate().is_err());

        let explicit = TomlConfig::from_str("[output]\npath = \"out.txt\"\nformat = \"csv\"\n").unwrap();
        assert!(explicit.validate().is_ok());
        assert_eq!(explicit.output_format(), OutputFormat::Csv);
    }
}
