use crate::config::settings::{AssistantConfig, NasaConfig, NcbiConfig, SimulationConfig};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 入口網站的完整設定，每個區段皆可省略
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub ncbi: NcbiConfig,
    pub nasa: NasaConfig,
    pub assistant: AssistantConfig,
    pub simulation: SimulationConfig,
}

impl PortalConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PortalError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NASA_API_KEY})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for PortalConfig {
    fn ncbi(&self) -> &NcbiConfig {
        &self.ncbi
    }

    fn nasa(&self) -> &NasaConfig {
        &self.nasa
    }

    fn assistant(&self) -> &AssistantConfig {
        &self.assistant
    }
}

impl Validate for PortalConfig {
    fn validate(&self) -> Result<()> {
        self.ncbi.validate()?;
        self.nasa.validate()?;
        self.assistant.validate()?;
        self.simulation.validate()?;
        tracing::debug!("✅ Portal configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = PortalConfig::from_toml_str("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_sections() {
        let toml_content = r#"
[ncbi]
database = "pmc"
timeout_seconds = 10

[simulation]
tick_interval_ms = 250

[simulation.model]
optimal_temperature = 30.0
"#;

        let config = PortalConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.ncbi.database, "pmc");
        assert_eq!(config.ncbi.timeout_seconds, 10);
        assert!(config.ncbi.search_url.ends_with("esearch.fcgi"));
        assert_eq!(config.simulation.tick_interval_ms, 250);
        assert_eq!(config.simulation.model.optimal_temperature, 30.0);
        assert_eq!(config.simulation.model.reference_oxygen, 21.0);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SPACE_BIO_TEST_NASA_KEY", "abc123");

        let toml_content = r#"
[nasa]
api_key = "${SPACE_BIO_TEST_NASA_KEY}"

[assistant]
api_key = "${SPACE_BIO_TEST_UNSET_KEY}"
"#;

        let config = PortalConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.nasa.api_key, "abc123");
        assert_eq!(config.assistant.api_key(), None);

        std::env::remove_var("SPACE_BIO_TEST_NASA_KEY");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[ncbi]
search_url = "invalid-url"
"#;
        let config = PortalConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let zero_divisor = r#"
[simulation.model]
reference_pressure = 0.0
"#;
        let config = PortalConfig::from_toml_str(zero_divisor).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let result = PortalConfig::from_toml_str("[ncbi\ndatabase = ");
        assert!(matches!(
            result,
            Err(PortalError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[assistant]\nmodel = \"test-model\"\n")
            .unwrap();

        let config = PortalConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.assistant.model, "test-model");
    }
}
