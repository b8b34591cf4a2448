#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use lambda::LambdaConfig;
pub use toml_config::PortalConfig;
