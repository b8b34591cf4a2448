pub mod assistant;
pub mod nasa;
pub mod ncbi;

use crate::adapters::{AssistantClient, NasaClient, NcbiClient};
use crate::core::extractor::RegexRecordExtractor;
use crate::core::literature::LiteratureService;
use crate::domain::ports::{ChatGateway, ConfigProvider, LiteratureSource, SpaceDataSource};
use crate::utils::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_EVENT_STREAM: &str = "text/event-stream";

/// API Gateway proxy 格式的請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "POST".to_string()
}

impl ProxyRequest {
    pub fn post(path: &str, body: serde_json::Value) -> Self {
        Self {
            http_method: "POST".to_string(),
            path: path.to_string(),
            body: Some(body.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    fn with_cors(status_code: u16, content_type: Option<&str>, body: String) -> Self {
        let mut headers = HashMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Headers".to_string(),
                "authorization, x-client-info, apikey, content-type".to_string(),
            ),
        ]);
        if let Some(content_type) = content_type {
            headers.insert("Content-Type".to_string(), content_type.to_string());
        }
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn preflight() -> Self {
        Self::with_cors(200, None, String::new())
    }

    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::with_cors(status_code, Some(CONTENT_TYPE_JSON), body),
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                Self::with_cors(
                    500,
                    Some(CONTENT_TYPE_JSON),
                    serde_json::json!({ "error": e.to_string() }).to_string(),
                )
            }
        }
    }

    pub fn event_stream(body: String) -> Self {
        Self::with_cors(200, Some(CONTENT_TYPE_EVENT_STREAM), body)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type").map(String::as_str)
    }

    pub fn json_body(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// 解析請求內容；空內容視為 `{}`
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(body: Option<&str>) -> Result<T> {
    let raw = body.map(str::trim).filter(|b| !b.is_empty()).unwrap_or("{}");
    serde_json::from_str(raw).map_err(|e| PortalError::RequestError {
        message: format!("Invalid JSON body: {}", e),
    })
}

/// 三個代理函式的集合，依路徑最後一段分派
pub struct PortalFunctions<L, C, N>
where
    L: LiteratureSource,
    C: ChatGateway,
    N: SpaceDataSource,
{
    literature: LiteratureService<L, RegexRecordExtractor>,
    assistant: C,
    space_data: N,
    default_database: String,
}

impl PortalFunctions<NcbiClient, AssistantClient, NasaClient> {
    pub fn from_config<P: ConfigProvider>(config: &P) -> Result<Self> {
        let literature = LiteratureService::new(
            NcbiClient::new(config.ncbi().clone())?,
            RegexRecordExtractor::new()?,
        );
        Ok(Self::new(
            literature,
            AssistantClient::new(config.assistant().clone())?,
            NasaClient::new(config.nasa().clone())?,
            config.ncbi().database.clone(),
        ))
    }
}

impl<L, C, N> PortalFunctions<L, C, N>
where
    L: LiteratureSource,
    C: ChatGateway,
    N: SpaceDataSource,
{
    pub fn new(
        literature: LiteratureService<L, RegexRecordExtractor>,
        assistant: C,
        space_data: N,
        default_database: String,
    ) -> Self {
        Self {
            literature,
            assistant,
            space_data,
            default_database,
        }
    }

    pub async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        if request.http_method.eq_ignore_ascii_case("OPTIONS") {
            return ProxyResponse::preflight();
        }

        let function = request
            .path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        let body = request.body.as_deref();

        tracing::debug!("Dispatching {} {}", request.http_method, request.path);
        match function {
            ncbi::FUNCTION_NAME => {
                ncbi::fetch_ncbi_data(&self.literature, &self.default_database, body).await
            }
            nasa::FUNCTION_NAME => nasa::fetch_nasa_data(&self.space_data, body).await,
            assistant::FUNCTION_NAME => assistant::ai_assistant(&self.assistant, body).await,
            other => {
                tracing::warn!("Unknown function requested: {}", other);
                ProxyResponse::json(
                    404,
                    &serde_json::json!({ "error": format!("Unknown function: {}", other) }),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_has_cors_headers() {
        let response = ProxyResponse::preflight();
        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(
            response.headers.get("Access-Control-Allow-Origin").map(String::as_str),
            Some("*")
        );
        assert_eq!(response.content_type(), None);
    }

    #[test]
    fn test_proxy_request_uses_gateway_field_names() {
        let request: ProxyRequest = serde_json::from_value(serde_json::json!({
            "httpMethod": "OPTIONS",
            "path": "/functions/v1/fetch-ncbi-data"
        }))
        .unwrap();

        assert_eq!(request.http_method, "OPTIONS");
        assert_eq!(request.body, None);

        let response = serde_json::to_value(ProxyResponse::preflight()).unwrap();
        assert_eq!(response["statusCode"], 200);
    }

    #[test]
    fn test_parse_body_defaults_and_errors() {
        let empty: serde_json::Value = parse_body(None).unwrap();
        assert_eq!(empty, serde_json::json!({}));

        let blank: serde_json::Value = parse_body(Some("  ")).unwrap();
        assert_eq!(blank, serde_json::json!({}));

        let broken = parse_body::<serde_json::Value>(Some("{term:"));
        assert!(matches!(broken, Err(PortalError::RequestError { .. })));
    }
}
