use crate::domain::model::Parameter;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_range, Validate};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "space-bio-hub")]
#[command(about = "Space biology simulation and literature tools")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the environmental response simulation
    Simulate(SimulateArgs),
    /// Search PubMed through the literature pipeline
    Search(SearchArgs),
    /// Fetch NASA open data
    SpaceData(SpaceDataArgs),
    /// Ask the AI research assistant
    Ask(AskArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    #[arg(long, default_value = "10")]
    pub ticks: u64,

    #[arg(long, allow_negative_numbers = true)]
    pub gravity: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub radiation: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub pressure: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub oxygen_level: Option<f64>,

    /// Experiment id (microgravity, radiation, temperature, metabolism)
    #[arg(long)]
    pub experiment: Option<String>,

    /// Override simulation.tick_interval_ms
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Directory for simulation_history.csv
    #[arg(long)]
    pub output: Option<String>,
}

impl SimulateArgs {
    pub fn overrides(&self) -> Vec<(Parameter, f64)> {
        [
            (Parameter::Gravity, self.gravity),
            (Parameter::Radiation, self.radiation),
            (Parameter::Temperature, self.temperature),
            (Parameter::Pressure, self.pressure),
            (Parameter::OxygenLevel, self.oxygen_level),
        ]
        .into_iter()
        .filter_map(|(parameter, value)| value.map(|v| (parameter, v)))
        .collect()
    }
}

impl Validate for SimulateArgs {
    /// 命令列輸入等同滑桿，必須落在參數範圍內
    fn validate(&self) -> Result<()> {
        for (parameter, value) in self.overrides() {
            let (min, max) = parameter.domain();
            validate_range(parameter.name(), value, min, max)?;
        }
        if let Some(interval) = self.interval_ms {
            validate_positive_number("interval_ms", interval, 1)?;
        }
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[arg(long, default_value = "space biology")]
    pub term: String,

    /// Knowledge hub category (nasa, astrobiology, microgravity, mars, space medicine)
    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value = "20")]
    pub retmax: u32,

    #[arg(long, default_value = "0")]
    pub retstart: u32,

    /// Directory for articles.csv
    #[arg(long)]
    pub output: Option<String>,
}

impl Validate for SearchArgs {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("term", &self.term)?;
        validate_positive_number("retmax", u64::from(self.retmax), 1)?;
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
pub struct SpaceDataArgs {
    #[arg(long, default_value = "planetary/apod")]
    pub endpoint: String,

    #[arg(long, default_value = "10")]
    pub limit: u32,

    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Debug, Clone, Args)]
pub struct AskArgs {
    pub message: String,

    #[arg(long)]
    pub stream: bool,
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
