use crate::config::{DEFAULT_DATE_FORMAT, DEFAULT_OUTPUT_SUFFIX};
use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub batch: BatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub name: Option<String>,
    pub inputs: Vec<String>,
    /// 相對輸入路徑的根目錄，預設為目前目錄
    pub base_path: Option<String>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// 整批報表輸出為 JSON 檔的路徑
    pub report_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            format: OutputFormat::default(),
            suffix: default_suffix(),
            report_path: None,
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_suffix() -> String {
    DEFAULT_OUTPUT_SUFFIX.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PESEL_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn batch_name(&self) -> &str {
        self.batch.name.as_deref().unwrap_or("pesel-batch")
    }

    pub fn base_path(&self) -> &str {
        self.batch.base_path.as_deref().unwrap_or(".")
    }

    pub fn verbose(&self) -> bool {
        self.batch.verbose.unwrap_or(false)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_files(&self) -> &[String] {
        &self.batch.inputs
    }

    fn date_format(&self) -> &str {
        &self.output.date_format
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    fn output_suffix(&self) -> &str {
        &self.output.suffix
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_input_files("batch.inputs", &self.batch.inputs)?;
        validation::validate_path("batch.base_path", self.base_path())?;
        validation::validate_date_format("output.date_format", &self.output.date_format)?;
        validation::validate_non_empty_string("output.suffix", &self.output.suffix)?;

        if let Some(report_path) = &self.output.report_path {
            validation::validate_path("output.report_path", report_path)?;
        }

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(EtlError::InvalidConfigValueError {
                    field: "monitoring.log_level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
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
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[batch]
inputs = ["pesel.txt"]
"#,
        )
        .unwrap();

        assert_eq!(config.input_files(), ["pesel.txt".to_string()]);
        assert_eq!(config.date_format(), DEFAULT_DATE_FORMAT);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.output_suffix(), DEFAULT_OUTPUT_SUFFIX);
        assert_eq!(config.batch_name(), "pesel-batch");
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PESEL_TOML_TEST_DIR", "/srv/pesel");
        let config = TomlConfig::from_toml_str(
            r#"
[batch]
inputs = ["${PESEL_TOML_TEST_DIR}/a.txt", "${PESEL_TOML_UNSET_VAR}/b.txt"]
"#,
        )
        .unwrap();

        assert_eq!(config.batch.inputs[0], "/srv/pesel/a.txt");
        assert_eq!(config.batch.inputs[1], "${PESEL_TOML_UNSET_VAR}/b.txt");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[batch]
inputs = ["pesel.txt"]

[output]
date_format = "%H:%M"

[monitoring]
enabled = true
log_level = "loud"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::InvalidConfigValueError { .. })
        ));

        let broken = TomlConfig::from_toml_str("[batch]\ninputs = 3\n");
        assert!(matches!(
            broken,
            Err(EtlError::ConfigValidationError { .. })
        ));
    }
}
