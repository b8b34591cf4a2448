use crate::utils::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 使用者以滑桿控制的五個環境輸入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalParameters {
    /// m/s²
    pub gravity: f64,
    /// mSv/day
    pub radiation: f64,
    /// °C
    pub temperature: f64,
    /// kPa
    pub pressure: f64,
    /// %
    pub oxygen_level: f64,
}

impl Default for EnvironmentalParameters {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            radiation: 0.0,
            temperature: 22.0,
            pressure: 101.3,
            oxygen_level: 21.0,
        }
    }
}

impl EnvironmentalParameters {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Gravity => self.gravity,
            Parameter::Radiation => self.radiation,
            Parameter::Temperature => self.temperature,
            Parameter::Pressure => self.pressure,
            Parameter::OxygenLevel => self.oxygen_level,
        }
    }

    pub fn set(&mut self, parameter: Parameter, value: f64) {
        match parameter {
            Parameter::Gravity => self.gravity = value,
            Parameter::Radiation => self.radiation = value,
            Parameter::Temperature => self.temperature = value,
            Parameter::Pressure => self.pressure = value,
            Parameter::OxygenLevel => self.oxygen_level = value,
        }
    }
}

/// 每個 tick 由環境參數推導出的生物反應
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiologicalResponse {
    pub cell_viability: f64,
    pub dna_stability: f64,
    pub metabolism_rate: f64,
    pub growth_rate: f64,
}

impl BiologicalResponse {
    pub const CELL_VIABILITY_CEILING: f64 = 100.0;
    pub const DNA_STABILITY_CEILING: f64 = 100.0;
    pub const METABOLISM_RATE_CEILING: f64 = 150.0;
    pub const GROWTH_RATE_CEILING: f64 = 120.0;

    pub fn is_within_bounds(&self) -> bool {
        (0.0..=Self::CELL_VIABILITY_CEILING).contains(&self.cell_viability)
            && (0.0..=Self::DNA_STABILITY_CEILING).contains(&self.dna_stability)
            && (0.0..=Self::METABOLISM_RATE_CEILING).contains(&self.metabolism_rate)
            && (0.0..=Self::GROWTH_RATE_CEILING).contains(&self.growth_rate)
    }
}

impl Default for BiologicalResponse {
    fn default() -> Self {
        Self {
            cell_viability: 100.0,
            dna_stability: 100.0,
            metabolism_rate: 100.0,
            growth_rate: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub parameters: EnvironmentalParameters,
    pub response: BiologicalResponse,
    pub elapsed_ticks: u64,
    pub is_running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parameter {
    Gravity,
    Radiation,
    Temperature,
    Pressure,
    OxygenLevel,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Gravity,
        Parameter::Radiation,
        Parameter::Temperature,
        Parameter::Pressure,
        Parameter::OxygenLevel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Gravity => "gravity",
            Parameter::Radiation => "radiation",
            Parameter::Temperature => "temperature",
            Parameter::Pressure => "pressure",
            Parameter::OxygenLevel => "oxygenLevel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Gravity => "Gravity",
            Parameter::Radiation => "Radiation",
            Parameter::Temperature => "Temperature",
            Parameter::Pressure => "Pressure",
            Parameter::OxygenLevel => "Oxygen Level",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Gravity => "m/s²",
            Parameter::Radiation => "mSv/day",
            Parameter::Temperature => "°C",
            Parameter::Pressure => "kPa",
            Parameter::OxygenLevel => "%",
        }
    }

    /// 滑桿的允許範圍 (min, max)
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Parameter::Gravity => (0.0, 9.8),
            Parameter::Radiation => (0.0, 100.0),
            Parameter::Temperature => (-50.0, 80.0),
            Parameter::Pressure => (0.0, 200.0),
            Parameter::OxygenLevel => (0.0, 100.0),
        }
    }

    pub fn step(&self) -> f64 {
        match self {
            Parameter::Gravity => 0.1,
            Parameter::Radiation | Parameter::OxygenLevel => 0.5,
            Parameter::Temperature | Parameter::Pressure => 1.0,
        }
    }

    pub fn optimal(&self) -> f64 {
        match self {
            Parameter::Gravity => 9.8,
            Parameter::Radiation => 0.0,
            Parameter::Temperature => 37.0,
            Parameter::Pressure => 101.3,
            Parameter::OxygenLevel => 21.0,
        }
    }

    /// 依照與最佳值的相對距離分級
    pub fn status(&self, value: f64) -> ParameterStatus {
        let (min, max) = self.domain();
        let distance = (value - self.optimal()).abs() / (max - min);
        if distance < 0.1 {
            ParameterStatus::Optimal
        } else if distance < 0.3 {
            ParameterStatus::Nominal
        } else if distance < 0.6 {
            ParameterStatus::Stressed
        } else {
            ParameterStatus::Critical
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gravity" => Ok(Parameter::Gravity),
            "radiation" => Ok(Parameter::Radiation),
            "temperature" => Ok(Parameter::Temperature),
            "pressure" => Ok(Parameter::Pressure),
            "oxygenLevel" | "oxygen_level" | "oxygen-level" => Ok(Parameter::OxygenLevel),
            other => Err(PortalError::UnknownParameter {
                name: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterStatus {
    Optimal,
    Nominal,
    Stressed,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Experiment {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub duration: &'static str,
    pub difficulty: &'static str,
}

pub const EXPERIMENTS: [Experiment; 4] = [
    Experiment {
        id: "microgravity",
        title: "Microgravity Cell Culture",
        description: "Study how reduced gravity affects cellular behavior and growth patterns",
        category: "Microgravity",
        duration: "7 days",
        difficulty: "Intermediate",
    },
    Experiment {
        id: "radiation",
        title: "Radiation Exposure Study",
        description: "Analyze DNA damage and repair mechanisms under cosmic radiation",
        category: "Radiation",
        duration: "14 days",
        difficulty: "Advanced",
    },
    Experiment {
        id: "temperature",
        title: "Extreme Temperature Adaptation",
        description: "Observe how organisms adapt to temperature fluctuations in space",
        category: "Environmental",
        duration: "5 days",
        difficulty: "Beginner",
    },
    Experiment {
        id: "metabolism",
        title: "Metabolic Rate Analysis",
        description: "Monitor metabolic changes in space-like conditions",
        category: "Physiology",
        duration: "10 days",
        difficulty: "Intermediate",
    },
];

pub fn find_experiment(id: &str) -> Option<&'static Experiment> {
    EXPERIMENTS.iter().find(|e| e.id == id)
}

/// 一筆 PubMed 紀錄的正規化結果，欄位名稱沿用前端使用的 JSON 格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedArticle {
    #[serde(rename = "pmid")]
    pub identifier: String,
    pub title: String,
    pub authors: String,
    pub journal: String,
    #[serde(rename = "year")]
    pub publication_year: String,
    #[serde(rename = "abstract")]
    pub abstract_summary: String,
    #[serde(rename = "url")]
    pub detail_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "source")]
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IdSearchResult {
    pub identifiers: Vec<String>,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSearchResponse {
    #[serde(alias = "data")]
    pub articles: Vec<NormalizedArticle>,
    pub total: u64,
    pub term: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub term: String,
    pub database: String,
    pub retmax: u32,
    pub retstart: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            term: "space biology".to_string(),
            database: "pubmed".to_string(),
            retmax: 20,
            retstart: 0,
        }
    }
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// 知識中心分類篩選：將分類展開成額外的搜尋關鍵字
    pub fn for_category(term: &str, category: &str) -> Self {
        let term = match category {
            "" => term.to_string(),
            "nasa" => format!("{} space missions", term),
            "astrobiology" => format!("{} astrobiology extremophiles", term),
            "microgravity" => format!("{} microgravity weightlessness", term),
            "mars" => format!("{} mars exploration", term),
            "space medicine" => format!("{} space medicine astronaut health", term),
            other => format!("{} {}", term, other),
        };
        Self::new(term)
    }
}
