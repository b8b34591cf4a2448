use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "space_bio_hub";
const FUNCTIONS_TARGET: &str = "space_bio_hub::app::functions";
const ADAPTERS_TARGET: &str = "space_bio_hub::adapters";
/// Lambda 執行檔本身的 target
const LAMBDA_BIN_TARGET: &str = "lambda";

/// CLI 預設：整個 crate 使用同一層級，HTTP 客戶端只留警告
fn cli_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("{}={},reqwest=warn,hyper=warn", CRATE_TARGET, level)
}

/// Lambda 預設：每個請求只留下函式層與 handler 的紀錄，上游呼叫細節降為警告
fn lambda_directives() -> String {
    format!(
        "{}=info,{}=info,{}=warn,{}=info,reqwest=warn,hyper=warn",
        CRATE_TARGET, FUNCTIONS_TARGET, ADAPTERS_TARGET, LAMBDA_BIN_TARGET
    )
}

fn env_filter(default_directives: String) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(cli_directives(verbose)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter(lambda_directives()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .json(), // CloudWatch 以 JSON 行解析
        )
        .init();
}
