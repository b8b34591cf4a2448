use clap::Parser;
use space_bio_hub::adapters::assistant::{parse_stream_tokens, parse_suggested_experiments};
use space_bio_hub::adapters::{AssistantClient, NasaClient, NcbiClient};
use space_bio_hub::config::cli::{AskArgs, Command, SearchArgs, SimulateArgs, SpaceDataArgs};
use space_bio_hub::core::simulation::format_elapsed;
use space_bio_hub::domain::gateway::{AssistantReply, AssistantRequest, ChatMessage, SpaceDataRequest};
use space_bio_hub::domain::model::{Parameter, SearchQuery};
use space_bio_hub::domain::ports::{ChatGateway, SpaceDataSource, Storage};
use space_bio_hub::utils::error::ErrorSeverity;
use space_bio_hub::utils::{logger, validation::Validate};
use space_bio_hub::{
    CliConfig, LiteratureService, LocalStorage, PortalConfig, PortalError, RegexRecordExtractor,
    Result, SimulationDriver, SimulationEngine, SimulationHistory,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::info!("🚀 Starting space-bio-hub CLI");

    let portal = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match PortalConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => PortalConfig::default(),
    };

    // 驗證配置
    if let Err(e) = portal.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match cli.command {
        Command::Simulate(args) => run_simulate(&portal, args).await,
        Command::Search(args) => run_search(&portal, args).await,
        Command::SpaceData(args) => run_space_data(&portal, args).await,
        Command::Ask(args) => run_ask(&portal, args).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run_simulate(portal: &PortalConfig, args: SimulateArgs) -> Result<()> {
    args.validate()?;

    let mut engine = SimulationEngine::with_constants(portal.simulation.model)?;
    if let Some(experiment) = &args.experiment {
        engine.select_experiment(experiment)?;
    }
    for (parameter, value) in args.overrides() {
        engine.set_parameter(parameter, value);
    }

    let cadence = args
        .interval_ms
        .map(std::time::Duration::from_millis)
        .unwrap_or_else(|| portal.simulation.cadence());

    let experiment = engine.experiment();
    println!("🧪 {} ({}, {})", experiment.title, experiment.category, experiment.duration);
    for parameter in Parameter::ALL {
        let value = engine.state().parameters.get(parameter);
        println!(
            "   {:<13} {:>7.1} {:<8} [{:?}]",
            parameter.label(),
            value,
            parameter.unit(),
            parameter.status(value)
        );
    }

    engine.start();
    let mut driver = SimulationDriver::new(engine, cadence);
    let mut history = SimulationHistory::new();

    tracing::info!("▶️ Running {} ticks every {:?}", args.ticks, cadence);
    driver
        .run(args.ticks, |engine| {
            let state = engine.state();
            history.record(state);
            println!(
                "{}  viability {:>6.2}  dna {:>6.2}  metabolism {:>6.2}  growth {:>6.2}",
                format_elapsed(state.elapsed_ticks),
                state.response.cell_viability,
                state.response.dna_stability,
                state.response.metabolism_rate,
                state.response.growth_rate
            );
            true
        })
        .await;

    if let Some(output) = &args.output {
        if history.is_empty() {
            tracing::warn!("⚠️ No ticks recorded, skipping history export");
        } else {
            let storage = LocalStorage::new(output.clone());
            history.export(&storage, "simulation_history.csv").await?;
            println!("📁 History saved to: {}/simulation_history.csv", output);
        }
    }

    Ok(())
}

async fn run_search(portal: &PortalConfig, args: SearchArgs) -> Result<()> {
    args.validate()?;

    let mut query = SearchQuery::for_category(&args.term, &args.category);
    query.database = portal.ncbi.database.clone();
    query.retmax = args.retmax;
    query.retstart = args.retstart;

    let service = LiteratureService::new(
        NcbiClient::new(portal.ncbi.clone())?,
        RegexRecordExtractor::new()?,
    );
    let response = service.search(&query).await?;

    println!(
        "📚 {} of {} results for '{}' ({})",
        response.articles.len(),
        response.total,
        response.term,
        response.source
    );
    for article in &response.articles {
        println!("- [{}] {} ({})", article.identifier, article.title, article.publication_year);
        println!("  {}  {}", article.authors, article.journal);
        println!("  {}", article.detail_url);
    }

    if let Some(output) = &args.output {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for article in &response.articles {
            writer.serialize(article)?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| PortalError::IoError(e.into_error()))?;
        LocalStorage::new(output.clone())
            .write_file("articles.csv", &data)
            .await?;
        println!("📁 Articles saved to: {}/articles.csv", output);
    }

    Ok(())
}

async fn run_space_data(portal: &PortalConfig, args: SpaceDataArgs) -> Result<()> {
    let client = NasaClient::new(portal.nasa.clone())?;
    let response = client
        .fetch(&SpaceDataRequest {
            endpoint: args.endpoint,
            limit: args.limit,
            search: args.search,
        })
        .await?;

    println!("🛰️ {} item(s) from {} ({})", response.count, response.endpoint, response.source);
    println!("{}", serde_json::to_string_pretty(&response.data)?);
    Ok(())
}

async fn run_ask(portal: &PortalConfig, args: AskArgs) -> Result<()> {
    let client = AssistantClient::new(portal.assistant.clone())?;
    let request = AssistantRequest {
        messages: vec![ChatMessage::user(args.message)],
        stream: args.stream,
    };

    match client.complete(&request).await? {
        AssistantReply::Stream(events) => {
            println!("{}", parse_stream_tokens(&events).concat());
        }
        AssistantReply::Completion(completion) => {
            if let Some(text) = &completion.response {
                println!("{}", text);
            }
            if let Some(tool_calls) = &completion.tool_calls {
                for experiment in parse_suggested_experiments(tool_calls)? {
                    println!(
                        "🧪 {} [{} / {}]: {}",
                        experiment.title,
                        experiment.category,
                        experiment.difficulty,
                        experiment.description
                    );
                }
            }
            tracing::debug!("Model used: {}", completion.model_used);
        }
    }

    Ok(())
}
