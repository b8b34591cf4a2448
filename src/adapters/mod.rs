// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod assistant;
pub mod nasa;
pub mod ncbi;

pub use assistant::AssistantClient;
pub use nasa::NasaClient;
pub use ncbi::NcbiClient;

use crate::utils::error::{PortalError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

pub(crate) fn http_client(timeout_seconds: u64) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?)
}

pub(crate) fn parse_url<I, K, V>(base: &str, params: I) -> Result<url::Url>
where
    I: IntoIterator,
    I::Item: std::borrow::Borrow<(K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    url::Url::parse_with_params(base, params).map_err(|e| PortalError::ConfigError {
        message: format!("Invalid endpoint URL '{}': {}", base, e),
    })
}

/// 非 2xx 回應轉為上游錯誤，保留回應內容以便記錄
pub(crate) async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("❌ {} error: {} {}", service, status.as_u16(), body);
    Err(PortalError::UpstreamError {
        service: service.to_string(),
        status: status.as_u16(),
        body,
    })
}
