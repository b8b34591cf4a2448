use crate::adapters::{ensure_success, http_client, parse_url};
use crate::config::settings::NcbiConfig;
use crate::domain::model::{IdSearchResult, SearchQuery};
use crate::domain::ports::LiteratureSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ESearchEnvelope {
    esearchresult: Option<ESearchResult>,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    count: Option<serde_json::Value>,
    #[serde(default)]
    idlist: Vec<String>,
}

/// NCBI E-utilities (ESearch + EFetch)
pub struct NcbiClient {
    client: Client,
    config: NcbiConfig,
}

impl NcbiClient {
    pub fn new(config: NcbiConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            config,
        })
    }

    fn parse_count(count: Option<&serde_json::Value>) -> u64 {
        match count {
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0),
            _ => 0,
        }
    }
}

#[async_trait]
impl LiteratureSource for NcbiClient {
    async fn search_ids(&self, query: &SearchQuery) -> Result<IdSearchResult> {
        let retmax = query.retmax.to_string();
        let retstart = query.retstart.to_string();
        let url = parse_url(
            &self.config.search_url,
            &[
                ("db", query.database.as_str()),
                ("term", query.term.as_str()),
                ("retmax", retmax.as_str()),
                ("retstart", retstart.as_str()),
                ("retmode", "json"),
            ],
        )?;

        tracing::debug!("Searching NCBI: {}", url);
        let response = self.client.get(url).send().await?;
        let response = ensure_success("NCBI search", response).await?;

        let envelope: ESearchEnvelope = response.json().await?;
        let result = envelope.esearchresult;
        let total_count = Self::parse_count(result.as_ref().and_then(|r| r.count.as_ref()));
        let identifiers = result.map(|r| r.idlist).unwrap_or_default();

        tracing::debug!(
            "NCBI search returned {} ids (total {})",
            identifiers.len(),
            total_count
        );
        Ok(IdSearchResult {
            identifiers,
            total_count,
        })
    }

    async fn fetch_records(&self, query: &SearchQuery, identifiers: &[String]) -> Result<String> {
        let ids = identifiers.join(",");
        let url = parse_url(
            &self.config.fetch_url,
            &[
                ("db", query.database.as_str()),
                ("id", ids.as_str()),
                ("retmode", "xml"),
            ],
        )?;

        tracing::debug!("Fetching NCBI details for {} articles", identifiers.len());
        let response = self.client.get(url).send().await?;
        let response = ensure_success("NCBI fetch", response).await?;

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_variants() {
        let as_string = serde_json::json!("1234");
        let as_number = serde_json::json!(56);
        let garbage = serde_json::json!("many");

        assert_eq!(NcbiClient::parse_count(Some(&as_string)), 1234);
        assert_eq!(NcbiClient::parse_count(Some(&as_number)), 56);
        assert_eq!(NcbiClient::parse_count(Some(&garbage)), 0);
        assert_eq!(NcbiClient::parse_count(None), 0);
    }
}
