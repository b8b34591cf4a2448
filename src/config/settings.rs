use crate::core::simulation::ModelConstants;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NcbiConfig {
    pub search_url: String,
    pub fetch_url: String,
    pub database: String,
    pub timeout_seconds: u64,
}

impl Default for NcbiConfig {
    fn default() -> Self {
        Self {
            search_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi".to_string(),
            fetch_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi".to_string(),
            database: "pubmed".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Validate for NcbiConfig {
    fn validate(&self) -> Result<()> {
        validate_url("ncbi.search_url", &self.search_url)?;
        validate_url("ncbi.fetch_url", &self.fetch_url)?;
        validate_non_empty_string("ncbi.database", &self.database)?;
        validate_positive_number("ncbi.timeout_seconds", self.timeout_seconds, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NasaConfig {
    pub api_base: String,
    pub exoplanet_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.nasa.gov".to_string(),
            exoplanet_url: "https://exoplanetarchive.ipac.caltech.edu/TAP/sync".to_string(),
            api_key: "DEMO_KEY".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Validate for NasaConfig {
    fn validate(&self) -> Result<()> {
        validate_url("nasa.api_base", &self.api_base)?;
        validate_url("nasa.exoplanet_url", &self.exoplanet_url)?;
        validate_non_empty_string("nasa.api_key", &self.api_key)?;
        validate_positive_number("nasa.timeout_seconds", self.timeout_seconds, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://ai.gateway.lovable.dev/v1/chat/completions".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            api_key: None,
            timeout_seconds: 60,
        }
    }
}

impl AssistantConfig {
    /// 空字串或未替換的 `${VAR}` 視為未設定
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
    }
}

impl Validate for AssistantConfig {
    fn validate(&self) -> Result<()> {
        // 缺少金鑰不在載入時報錯，而是在每次請求時回報
        validate_url("assistant.endpoint", &self.endpoint)?;
        validate_non_empty_string("assistant.model", &self.model)?;
        validate_positive_number("assistant.timeout_seconds", self.timeout_seconds, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    pub model: ModelConstants,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            model: ModelConstants::default(),
        }
    }
}

impl SimulationConfig {
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("simulation.tick_interval_ms", self.tick_interval_ms, 1)?;
        self.model.validate()
    }
}
