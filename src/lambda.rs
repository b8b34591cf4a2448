#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use space_bio_hub::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use space_bio_hub::{LambdaConfig, PortalFunctions, ProxyRequest, ProxyResponse};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
type Functions = PortalFunctions<
    space_bio_hub::adapters::NcbiClient,
    space_bio_hub::adapters::AssistantClient,
    space_bio_hub::adapters::NasaClient,
>;

#[cfg(feature = "lambda")]
async fn function_handler(
    functions: Arc<Functions>,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ProxyResponse, Error> {
    tracing::info!(
        request_id = %event.context.request_id,
        "Handling {} {}",
        event.payload.http_method,
        event.payload.path
    );

    let response = functions.handle(event.payload).await;

    tracing::info!("Responded with status {}", response.status_code);
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 創建Lambda配置
    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let functions = Arc::new(PortalFunctions::from_config(&config)?);

    run(service_fn(move |event: LambdaEvent<ProxyRequest>| {
        let functions = Arc::clone(&functions);
        async move { function_handler(functions, event).await }
    }))
    .await
}
