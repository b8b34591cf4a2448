use crate::core::simulation::SimulationEngine;
use crate::domain::model::SimulationState;
use crate::domain::ports::Storage;
use crate::utils::error::{PortalError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// 固定節奏驅動引擎；引擎由 driver 獨佔，tick 與 reset 自然序列化
pub struct SimulationDriver {
    engine: SimulationEngine,
    cadence: Duration,
}

impl SimulationDriver {
    pub fn new(engine: SimulationEngine, cadence: Duration) -> Self {
        Self { engine, cadence }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    /// 最多執行 `max_ticks` 次；觀察者回傳 `false` 或引擎被暫停時提前結束
    pub async fn run<F>(&mut self, max_ticks: u64, mut observer: F) -> u64
    where
        F: FnMut(&mut SimulationEngine) -> bool,
    {
        let mut interval = tokio::time::interval(self.cadence);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // 第一次 tick 立即完成，跳過以維持每個週期一次
        interval.tick().await;

        let mut completed = 0;
        while completed < max_ticks && self.engine.is_running() {
            interval.tick().await;
            if !self.engine.tick() {
                break;
            }
            completed += 1;
            if !observer(&mut self.engine) {
                break;
            }
        }

        tracing::debug!(
            "⏱️ Driver stopped after {} ticks (running: {})",
            completed,
            self.engine.is_running()
        );
        completed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub tick: u64,
    pub recorded_at: DateTime<Utc>,
    pub gravity: f64,
    pub radiation: f64,
    pub temperature: f64,
    pub pressure: f64,
    pub oxygen_level: f64,
    pub cell_viability: f64,
    pub dna_stability: f64,
    pub metabolism_rate: f64,
    pub growth_rate: f64,
}

impl HistoryRow {
    fn from_state(state: &SimulationState) -> Self {
        Self {
            tick: state.elapsed_ticks,
            recorded_at: Utc::now(),
            gravity: state.parameters.gravity,
            radiation: state.parameters.radiation,
            temperature: state.parameters.temperature,
            pressure: state.parameters.pressure,
            oxygen_level: state.parameters.oxygen_level,
            cell_viability: state.response.cell_viability,
            dna_stability: state.response.dna_stability,
            metabolism_rate: state.response.metabolism_rate,
            growth_rate: state.response.growth_rate,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationHistory {
    rows: Vec<HistoryRow>,
}

impl SimulationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: &SimulationState) {
        self.rows.push(HistoryRow::from_state(state));
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        let bytes = writer.into_inner().map_err(|e| PortalError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| PortalError::ExtractionError {
            message: format!("CSV output is not UTF-8: {}", e),
        })
    }

    pub async fn export<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let csv_output = self.to_csv()?;
        tracing::debug!("Writing {} history rows to {}", self.rows.len(), path);
        storage.write_file(path, csv_output.as_bytes()).await
    }
}
