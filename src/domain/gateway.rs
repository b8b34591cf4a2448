use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssistantRequest {
    /// 必填；缺少時請求直接失敗，不會只帶系統提示呼叫閘道
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
}

/// 非串流模式的回覆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantCompletion {
    pub response: Option<String>,
    pub tool_calls: Option<serde_json::Value>,
    pub model_used: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssistantReply {
    Completion(AssistantCompletion),
    /// 原樣轉送的 SSE 內容 (`text/event-stream`)
    Stream(String),
}

/// `suggest_experiments` 工具回傳的單一實驗建議
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedExperiment {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceDataRequest {
    pub endpoint: String,
    pub limit: u32,
    pub search: String,
}

impl Default for SpaceDataRequest {
    fn default() -> Self {
        Self {
            endpoint: "planetary/apod".to_string(),
            limit: 10,
            search: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceDataResponse {
    pub data: serde_json::Value,
    pub endpoint: String,
    pub count: usize,
    pub source: String,
}
