use space_bio_hub::domain::model::Parameter;
use space_bio_hub::utils::validation::Validate;
use space_bio_hub::{
    LocalStorage, PortalConfig, SimulationDriver, SimulationEngine, SimulationHistory,
};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_driver_records_and_exports_history() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().to_string());

    let mut engine = SimulationEngine::new();
    engine.select_experiment("radiation").unwrap();
    engine.set_parameter(Parameter::Radiation, 40.0);
    engine.start();

    let mut driver = SimulationDriver::new(engine, Duration::from_millis(1));
    let mut history = SimulationHistory::new();

    let completed = driver
        .run(5, |engine| {
            history.record(engine.state());
            true
        })
        .await;

    assert_eq!(completed, 5);
    assert_eq!(history.len(), 5);
    assert_eq!(driver.engine().state().elapsed_ticks, 5);

    history.export(&storage, "runs/history.csv").await.unwrap();

    let content = fs::read_to_string(temp_dir.path().join("runs/history.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("tick,recorded_at,gravity,radiation"));
    assert!(lines[1].starts_with("1,"));
    assert!(lines[5].starts_with("5,"));
    assert!(lines[1].contains(",40.0,") || lines[1].contains(",40,"));
}

#[tokio::test]
async fn test_driver_stops_when_observer_pauses_engine() {
    let mut engine = SimulationEngine::new();
    engine.start();

    let mut driver = SimulationDriver::new(engine, Duration::from_millis(1));
    let completed = driver
        .run(100, |engine| {
            if engine.state().elapsed_ticks == 3 {
                engine.pause();
            }
            true
        })
        .await;

    assert_eq!(completed, 3);
    assert!(!driver.engine().is_running());

    // 暫停後再執行不會推進狀態
    let frozen = driver.engine().state().clone();
    assert_eq!(driver.run(10, |_| true).await, 0);
    assert_eq!(driver.engine().state(), &frozen);
}

#[tokio::test]
async fn test_responses_stay_within_bounds_under_extreme_inputs() {
    let mut engine = SimulationEngine::new();
    engine.set_parameter(Parameter::Gravity, 0.0);
    engine.set_parameter(Parameter::Radiation, 100.0);
    engine.set_parameter(Parameter::Temperature, 100.0);
    engine.set_parameter(Parameter::Pressure, 0.0);
    engine.set_parameter(Parameter::OxygenLevel, 0.0);
    engine.start();

    let mut driver = SimulationDriver::new(engine, Duration::from_millis(1));
    let completed = driver
        .run(50, |engine| {
            assert!(engine.state().response.is_within_bounds());
            true
        })
        .await;

    assert_eq!(completed, 50);
    let response = driver.engine().state().response;
    assert_eq!(response.cell_viability, 0.0);
    assert_eq!(response.growth_rate, 0.0);
}

#[test]
fn test_toml_config_file_with_env_substitution() {
    std::env::set_var("SPACE_BIO_TEST_NASA_KEY", "from-env");

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("portal.toml");
    fs::write(
        &config_path,
        r#"
[ncbi]
database = "pmc"
timeout_seconds = 10

[nasa]
api_key = "${SPACE_BIO_TEST_NASA_KEY}"

[assistant]
api_key = "${SPACE_BIO_TEST_MISSING_AI_KEY}"

[simulation]
tick_interval_ms = 250

[simulation.model]
optimal_temperature = 30.0
"#,
    )
    .unwrap();

    let config = PortalConfig::from_file(&config_path).unwrap();
    assert!(config.validate().is_ok());

    assert_eq!(config.ncbi.database, "pmc");
    assert_eq!(config.ncbi.timeout_seconds, 10);
    assert_eq!(config.nasa.api_key, "from-env");
    assert_eq!(config.assistant.api_key(), None);
    assert_eq!(config.simulation.cadence(), Duration::from_millis(250));
    assert_eq!(config.simulation.model.optimal_temperature, 30.0);
    assert_eq!(config.simulation.model.reference_gravity, 9.8);

    let engine = SimulationEngine::with_constants(config.simulation.model).unwrap();
    assert_eq!(engine.constants().optimal_temperature, 30.0);
}

#[test]
fn test_zero_divisor_in_config_is_rejected() {
    let config = PortalConfig::from_toml_str(
        r#"
[simulation.model]
reference_oxygen = 0.0
"#,
    )
    .unwrap();

    assert!(config.validate().is_err());
    assert!(SimulationEngine::with_constants(config.simulation.model).is_err());
}
