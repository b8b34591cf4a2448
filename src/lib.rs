pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use app::functions::{PortalFunctions, ProxyRequest, ProxyResponse};
pub use config::{LambdaConfig, PortalConfig};
pub use core::{
    driver::{SimulationDriver, SimulationHistory},
    extractor::RegexRecordExtractor,
    literature::LiteratureService,
    simulation::SimulationEngine,
};
pub use utils::error::{PortalError, Result};
