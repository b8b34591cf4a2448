use crate::app::functions::{parse_body, ProxyResponse};
use crate::domain::gateway::SpaceDataRequest;
use crate::domain::ports::SpaceDataSource;
use serde_json::json;

pub const FUNCTION_NAME: &str = "fetch-nasa-data";

pub async fn fetch_nasa_data<N: SpaceDataSource>(source: &N, body: Option<&str>) -> ProxyResponse {
    let result = match parse_body::<SpaceDataRequest>(body) {
        Ok(request) => source.fetch(&request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => ProxyResponse::json(200, &response),
        Err(e) => {
            tracing::error!("❌ Error in {} function: {}", FUNCTION_NAME, e);
            ProxyResponse::json(500, &json!({ "error": e.to_string(), "endpoint": "nasa" }))
        }
    }
}
