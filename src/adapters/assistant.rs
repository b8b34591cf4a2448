//! AI 聊天閘道
//!
//! 串流與非串流共用同一條請求路徑，只有工具定義與回應處理依 `stream` 分流。
//! API Gateway proxy 回應只能帶一個完整 body，串流內容會先完整讀取再原樣轉送。

use crate::adapters::http_client;
use crate::config::settings::AssistantConfig;
use crate::domain::gateway::{
    AssistantCompletion, AssistantReply, AssistantRequest, ChatMessage, SuggestedExperiment,
};
use crate::domain::ports::ChatGateway;
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SYSTEM_PROMPT: &str = "You are VISHWA-AI, an advanced AI assistant specializing in space biology and astrobiology research. You have expertise in:

- Microgravity effects on biological systems
- Space medicine and life support systems
- Astrobiology and extremophiles
- NASA space missions and research
- NCBI biomedical databases and research
- Biological experiments in space environments
- Mars colonization biology challenges
- Radiation effects on living organisms

Provide accurate, scientific responses with a futuristic, space-exploration tone. Always suggest relevant experiments or research when appropriate. Keep responses concise but informative.";

pub const SUGGEST_EXPERIMENTS_TOOL: &str = "suggest_experiments";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    tool_calls: Option<Value>,
}

fn experiment_tools() -> Value {
    json!([{
        "type": "function",
        "function": {
            "name": SUGGEST_EXPERIMENTS_TOOL,
            "description": "Suggest 3-5 space biology experiments based on user input.",
            "parameters": {
                "type": "object",
                "properties": {
                    "experiments": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "title": { "type": "string" },
                                "description": { "type": "string" },
                                "category": {
                                    "type": "string",
                                    "enum": ["microgravity", "radiation", "life_support", "astrobiology", "space_medicine"]
                                },
                                "difficulty": {
                                    "type": "string",
                                    "enum": ["beginner", "intermediate", "advanced"]
                                },
                                "duration": { "type": "string" }
                            },
                            "required": ["title", "description", "category", "difficulty"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["experiments"],
                "additionalProperties": false
            }
        }
    }])
}

pub struct AssistantClient {
    client: Client,
    config: AssistantConfig,
}

impl AssistantClient {
    pub fn new(config: AssistantConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            config,
        })
    }
}

#[async_trait]
impl ChatGateway for AssistantClient {
    async fn complete(&self, request: &AssistantRequest) -> Result<AssistantReply> {
        tracing::info!(
            "🤖 AI Assistant request: stream={}, messages={}",
            request.stream,
            request.messages.len()
        );

        // 金鑰缺失屬於設定錯誤，不發出任何請求
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| PortalError::MissingConfigError {
                field: "AI_GATEWAY_API_KEY".to_string(),
            })?;

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(request.messages.iter().cloned());

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            stream: request.stream,
            tools: (!request.stream).then(experiment_tools),
        };

        tracing::debug!("Calling AI gateway with model {}", self.config.model);
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("❌ AI Gateway error: {} {}", status.as_u16(), error_text);
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => PortalError::RateLimited,
                StatusCode::PAYMENT_REQUIRED => PortalError::PaymentRequired,
                _ => PortalError::UpstreamError {
                    service: "AI Gateway".to_string(),
                    status: status.as_u16(),
                    body: error_text,
                },
            });
        }

        if request.stream {
            return Ok(AssistantReply::Stream(response.text().await?));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let message = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| PortalError::ExtractionError {
                message: "AI gateway response contained no choices".to_string(),
            })?;

        if let Some(Value::Array(calls)) = &message.tool_calls {
            tracing::info!("Tool calls received: {}", calls.len());
        }

        Ok(AssistantReply::Completion(AssistantCompletion {
            response: message.content,
            tool_calls: message.tool_calls,
            model_used: self.config.model.clone(),
        }))
    }
}

/// 從 SSE 內容取出 `choices[0].delta.content` 片段
pub fn parse_stream_tokens(event_stream: &str) -> Vec<String> {
    event_stream
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .filter(|payload| !payload.is_empty() && *payload != "[DONE]")
        .filter_map(|payload| serde_json::from_str::<Value>(payload).ok())
        .filter_map(|event| {
            event
                .pointer("/choices/0/delta/content")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .collect()
}

/// 解析 `suggest_experiments` 工具呼叫的參數
pub fn parse_suggested_experiments(tool_calls: &Value) -> Result<Vec<SuggestedExperiment>> {
    #[derive(Deserialize)]
    struct Arguments {
        experiments: Vec<SuggestedExperiment>,
    }

    let mut experiments = Vec::new();
    for call in tool_calls.as_array().into_iter().flatten() {
        let function = match call.get("function") {
            Some(function) => function,
            None => continue,
        };
        if function.get("name").and_then(Value::as_str) != Some(SUGGEST_EXPERIMENTS_TOOL) {
            continue;
        }

        // 參數通常是 JSON 字串，少數閘道直接給物件
        let arguments: Arguments = match function.get("arguments") {
            Some(Value::String(raw)) => serde_json::from_str(raw)?,
            Some(object) => serde_json::from_value(object.clone())?,
            None => continue,
        };
        experiments.extend(arguments.experiments);
    }
    Ok(experiments)
}
