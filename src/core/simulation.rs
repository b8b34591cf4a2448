//! 環境反應模擬引擎
//!
//! 引擎由呼叫端明確持有，每個 tick 只依賴上一個 tick 的環境參數，
//! 輸出值各自有獨立的上下限。

use crate::domain::model::{
    find_experiment, BiologicalResponse, EnvironmentalParameters, Experiment, Parameter,
    SimulationState, EXPERIMENTS,
};
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::{validate_non_zero_divisor, Validate};
use serde::{Deserialize, Serialize};

/// 模型公式中使用的常數，預設值即為原始公式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConstants {
    pub reference_gravity: f64,
    pub radiation_ceiling: f64,
    pub optimal_temperature: f64,
    pub temperature_tolerance: f64,
    pub reference_pressure: f64,
    pub reference_oxygen: f64,
    pub dna_radiation_penalty: f64,
    pub gravity_metabolism_boost: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            reference_gravity: 9.8,
            radiation_ceiling: 100.0,
            optimal_temperature: 37.0,
            temperature_tolerance: 50.0,
            reference_pressure: 101.3,
            reference_oxygen: 21.0,
            dna_radiation_penalty: 0.5,
            gravity_metabolism_boost: 20.0,
        }
    }
}

impl Validate for ModelConstants {
    fn validate(&self) -> Result<()> {
        validate_non_zero_divisor("simulation.model.reference_gravity", self.reference_gravity)?;
        validate_non_zero_divisor("simulation.model.radiation_ceiling", self.radiation_ceiling)?;
        validate_non_zero_divisor(
            "simulation.model.temperature_tolerance",
            self.temperature_tolerance,
        )?;
        validate_non_zero_divisor(
            "simulation.model.reference_pressure",
            self.reference_pressure,
        )?;
        validate_non_zero_divisor("simulation.model.reference_oxygen", self.reference_oxygen)?;
        Ok(())
    }
}

/// 單一 tick 由環境參數算出的五個因子
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseFactors {
    pub gravity: f64,
    pub radiation: f64,
    pub temperature: f64,
    pub pressure: f64,
    pub oxygen: f64,
}

impl ResponseFactors {
    pub fn compute(params: &EnvironmentalParameters, constants: &ModelConstants) -> Self {
        Self {
            gravity: (constants.reference_gravity - params.gravity) / constants.reference_gravity,
            radiation: ((constants.radiation_ceiling - params.radiation)
                / constants.radiation_ceiling)
                .max(0.0),
            temperature: (1.0
                - (params.temperature - constants.optimal_temperature).abs()
                    / constants.temperature_tolerance)
                .max(0.0),
            pressure: (params.pressure / constants.reference_pressure).max(0.0),
            oxygen: (params.oxygen_level / constants.reference_oxygen).max(0.0),
        }
    }
}

fn derive_response(
    params: &EnvironmentalParameters,
    factors: &ResponseFactors,
    constants: &ModelConstants,
) -> BiologicalResponse {
    let cell_viability = (factors.radiation
        * factors.temperature
        * factors.pressure
        * factors.oxygen
        * 100.0)
        .clamp(0.0, BiologicalResponse::CELL_VIABILITY_CEILING);

    let dna_stability = (factors.radiation * 100.0
        - params.radiation * constants.dna_radiation_penalty)
        .clamp(0.0, BiologicalResponse::DNA_STABILITY_CEILING);

    let metabolism_rate = (factors.temperature
        * factors.oxygen
        * (100.0 + factors.gravity * constants.gravity_metabolism_boost))
        .clamp(0.0, BiologicalResponse::METABOLISM_RATE_CEILING);

    // 成長率依賴本次剛算出的細胞存活率與代謝率
    let growth_rate = (cell_viability * metabolism_rate / 100.0)
        .clamp(0.0, BiologicalResponse::GROWTH_RATE_CEILING);

    BiologicalResponse {
        cell_viability,
        dna_stability,
        metabolism_rate,
        growth_rate,
    }
}

#[derive(Debug, Clone)]
pub struct SimulationEngine {
    state: SimulationState,
    constants: ModelConstants,
    experiment: &'static Experiment,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self {
            state: SimulationState::default(),
            constants: ModelConstants::default(),
            experiment: &EXPERIMENTS[0],
        }
    }
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以自訂常數建立引擎，除數為零時拒絕建立
    pub fn with_constants(constants: ModelConstants) -> Result<Self> {
        constants.validate()?;
        Ok(Self {
            constants,
            ..Self::default()
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    pub fn experiment(&self) -> &'static Experiment {
        self.experiment
    }

    pub fn select_experiment(&mut self, id: &str) -> Result<()> {
        let experiment = find_experiment(id).ok_or_else(|| PortalError::RequestError {
            message: format!("Unknown experiment: {}", id),
        })?;
        self.experiment = experiment;
        Ok(())
    }

    /// 直接寫入數值，不做範圍檢查；範圍限制由輸入端負責
    pub fn set_parameter(&mut self, parameter: Parameter, value: f64) {
        self.state.parameters.set(parameter, value);
    }

    pub fn set_parameter_by_name(&mut self, name: &str, value: f64) -> Result<()> {
        let parameter: Parameter = name.parse()?;
        self.set_parameter(parameter, value);
        Ok(())
    }

    pub fn start(&mut self) {
        self.state.is_running = true;
    }

    pub fn pause(&mut self) {
        self.state.is_running = false;
    }

    pub fn toggle(&mut self) {
        self.state.is_running = !self.state.is_running;
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn reset(&mut self) {
        self.state = SimulationState::default();
    }

    /// 暫停中呼叫不會有任何變化並回傳 `false`
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }

        self.state.elapsed_ticks += 1;
        let params = self.state.parameters;
        let factors = ResponseFactors::compute(&params, &self.constants);
        self.state.response = derive_response(&params, &factors, &self.constants);

        tracing::trace!(
            tick = self.state.elapsed_ticks,
            cell_viability = self.state.response.cell_viability,
            growth_rate = self.state.response.growth_rate,
            "simulation tick"
        );
        true
    }

    pub fn current_factors(&self) -> ResponseFactors {
        ResponseFactors::compute(&self.state.parameters, &self.constants)
    }
}

/// 以 HH:MM:SS 顯示經過的模擬秒數
pub fn format_elapsed(ticks: u64) -> String {
    let hours = ticks / 3600;
    let minutes = (ticks % 3600) / 60;
    let seconds = ticks % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_default_state() {
        let engine = SimulationEngine::new();
        let state = engine.state();

        assert_eq!(state.parameters.gravity, 9.8);
        assert_eq!(state.parameters.radiation, 0.0);
        assert_eq!(state.parameters.temperature, 22.0);
        assert_eq!(state.parameters.pressure, 101.3);
        assert_eq!(state.parameters.oxygen_level, 21.0);
        assert_eq!(state.response, BiologicalResponse::default());
        assert_eq!(state.elapsed_ticks, 0);
        assert!(!state.is_running);
        assert_eq!(engine.experiment().id, "microgravity");
    }

    #[test]
    fn test_single_step_from_defaults() {
        let mut engine = SimulationEngine::new();
        engine.start();

        let factors = engine.current_factors();
        assert_close(factors.gravity, 0.0);
        assert_close(factors.radiation, 1.0);
        assert_close(factors.temperature, 0.7);
        assert_close(factors.pressure, 1.0);
        assert_close(factors.oxygen, 1.0);

        assert!(engine.tick());

        let response = engine.state().response;
        assert_close(response.cell_viability, 70.0);
        assert_close(response.dna_stability, 100.0);
        assert_close(response.metabolism_rate, 70.0);
        assert_close(response.growth_rate, 49.0);
        assert_eq!(engine.state().elapsed_ticks, 1);
    }

    #[test]
    fn test_tick_while_paused_is_noop() {
        let mut engine = SimulationEngine::new();
        engine.start();
        engine.tick();
        engine.pause();

        let before = engine.state().clone();
        assert!(!engine.tick());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_start_and_pause_are_idempotent() {
        let mut engine = SimulationEngine::new();
        engine.pause();
        assert!(!engine.is_running());
        engine.start();
        engine.start();
        assert!(engine.is_running());
        engine.toggle();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_reset_restores_defaults_and_is_idempotent() {
        let mut engine = SimulationEngine::new();
        engine.set_parameter(Parameter::Radiation, 80.0);
        engine.set_parameter(Parameter::Gravity, 1.6);
        engine.start();
        for _ in 0..10 {
            engine.tick();
        }

        engine.reset();
        let once = engine.state().clone();
        engine.reset();

        assert_eq!(engine.state(), &once);
        assert_eq!(once, SimulationState::default());
        assert!(!once.is_running);
    }

    #[test]
    fn test_set_parameter_does_not_clamp() {
        let mut engine = SimulationEngine::new();
        engine.set_parameter(Parameter::Pressure, 500.0);
        engine.set_parameter_by_name("oxygenLevel", -10.0).unwrap();

        assert_eq!(engine.state().parameters.pressure, 500.0);
        assert_eq!(engine.state().parameters.oxygen_level, -10.0);
        assert!(engine.set_parameter_by_name("humidity", 1.0).is_err());
    }

    #[test]
    fn test_parameters_are_stable_across_ticks() {
        let mut engine = SimulationEngine::new();
        engine.set_parameter(Parameter::Temperature, 37.0);
        engine.start();
        let params = engine.state().parameters;
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.state().parameters, params);
    }

    #[test]
    fn test_outputs_stay_within_ceilings() {
        let mut engine = SimulationEngine::new();
        engine.start();

        let samples = [-1000.0, -50.0, 0.0, 9.8, 21.0, 37.0, 101.3, 200.0, 1000.0];
        for &gravity in &samples {
            for &radiation in &samples {
                for &temperature in &samples {
                    for &pressure in &samples {
                        for &oxygen in &samples {
                            engine.set_parameter(Parameter::Gravity, gravity);
                            engine.set_parameter(Parameter::Radiation, radiation);
                            engine.set_parameter(Parameter::Temperature, temperature);
                            engine.set_parameter(Parameter::Pressure, pressure);
                            engine.set_parameter(Parameter::OxygenLevel, oxygen);
                            engine.tick();
                            assert!(
                                engine.state().response.is_within_bounds(),
                                "out of bounds: {:?}",
                                engine.state()
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_microgravity_raises_metabolism_above_nominal() {
        let mut engine = SimulationEngine::new();
        engine.set_parameter(Parameter::Gravity, 0.0);
        engine.set_parameter(Parameter::Temperature, 37.0);
        engine.set_parameter(Parameter::OxygenLevel, 42.0);
        engine.start();
        engine.tick();

        let response = engine.state().response;
        // 1 * 2 * (100 + 20) = 240 -> 150
        assert_close(response.metabolism_rate, 150.0);
        // 100 * 2 capped to 100, then 100 * 150 / 100 = 150 -> 120
        assert_close(response.cell_viability, 100.0);
        assert_close(response.growth_rate, 120.0);
    }

    #[test]
    fn test_metabolism_scales_with_gravity_factor() {
        let mut engine = SimulationEngine::new();
        engine.set_parameter(Parameter::Gravity, 4.9);
        engine.start();
        engine.tick();

        assert_close(engine.current_factors().gravity, 0.5);
        // 0.7 * 1 * (100 + 0.5 * 20) = 77
        assert_close(engine.state().response.metabolism_rate, 77.0);
        assert_close(engine.state().response.growth_rate, 70.0 * 77.0 / 100.0);
    }

    #[test]
    fn test_zero_divisor_constants_rejected() {
        let constants = ModelConstants {
            reference_oxygen: 0.0,
            ..ModelConstants::default()
        };
        assert!(SimulationEngine::with_constants(constants).is_err());
        assert!(SimulationEngine::with_constants(ModelConstants::default()).is_ok());
    }

    #[test]
    fn test_select_experiment_survives_reset() {
        let mut engine = SimulationEngine::new();
        engine.select_experiment("radiation").unwrap();
        engine.reset();
        assert_eq!(engine.experiment().title, "Radiation Exposure Study");
        assert!(engine.select_experiment("unknown").is_err());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(61), "00:01:01");
        assert_eq!(format_elapsed(3725), "01:02:05");
    }
}
