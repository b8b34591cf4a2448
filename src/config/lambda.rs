use crate::config::settings::{AssistantConfig, NasaConfig, NcbiConfig};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::Validate;
use std::env;

/// Lambda 環境下由環境變數組成的設定
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub ncbi: NcbiConfig,
    pub nasa: NasaConfig,
    pub assistant: AssistantConfig,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let ncbi_defaults = NcbiConfig::default();
        let nasa_defaults = NasaConfig::default();
        let assistant_defaults = AssistantConfig::default();

        Ok(Self {
            ncbi: NcbiConfig {
                search_url: env::var("NCBI_SEARCH_URL").unwrap_or(ncbi_defaults.search_url),
                fetch_url: env::var("NCBI_FETCH_URL").unwrap_or(ncbi_defaults.fetch_url),
                database: ncbi_defaults.database,
                timeout_seconds: parse_env("NCBI_TIMEOUT_SECONDS", ncbi_defaults.timeout_seconds)?,
            },
            nasa: NasaConfig {
                api_base: env::var("NASA_API_BASE").unwrap_or(nasa_defaults.api_base),
                exoplanet_url: env::var("NASA_EXOPLANET_URL")
                    .unwrap_or(nasa_defaults.exoplanet_url),
                api_key: env::var("NASA_API_KEY").unwrap_or(nasa_defaults.api_key),
                timeout_seconds: parse_env("NASA_TIMEOUT_SECONDS", nasa_defaults.timeout_seconds)?,
            },
            assistant: AssistantConfig {
                endpoint: env::var("AI_GATEWAY_URL").unwrap_or(assistant_defaults.endpoint),
                model: env::var("AI_GATEWAY_MODEL").unwrap_or(assistant_defaults.model),
                api_key: env::var("AI_GATEWAY_API_KEY").ok(),
                timeout_seconds: parse_env(
                    "AI_GATEWAY_TIMEOUT_SECONDS",
                    assistant_defaults.timeout_seconds,
                )?,
            },
        })
    }
}

fn parse_env(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PortalError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "Expected a positive integer".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

impl ConfigProvider for LambdaConfig {
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

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.ncbi.validate()?;
        self.nasa.validate()?;
        self.assistant.validate()?;

        if self.assistant.api_key().is_none() {
            tracing::warn!("⚠️ AI_GATEWAY_API_KEY is not set; ai-assistant requests will fail");
        }

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
