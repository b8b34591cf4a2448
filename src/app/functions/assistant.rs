use crate::app::functions::{parse_body, ProxyResponse};
use crate::domain::gateway::{AssistantReply, AssistantRequest};
use crate::domain::ports::ChatGateway;
use serde_json::json;

pub const FUNCTION_NAME: &str = "ai-assistant";

/// 429/402 直接對應上游狀態，其餘錯誤一律 500 `server_error`
pub async fn ai_assistant<C: ChatGateway>(gateway: &C, body: Option<&str>) -> ProxyResponse {
    let result = match parse_body::<AssistantRequest>(body) {
        Ok(request) => gateway.complete(&request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(AssistantReply::Completion(completion)) => {
            tracing::info!("AI response received successfully");
            ProxyResponse::json(200, &completion)
        }
        Ok(AssistantReply::Stream(events)) => ProxyResponse::event_stream(events),
        Err(e) => {
            tracing::error!("❌ Error in {} function: {}", FUNCTION_NAME, e);
            ProxyResponse::json(
                e.status_code(),
                &json!({ "error": e.to_string(), "type": e.error_type() }),
            )
        }
    }
}
