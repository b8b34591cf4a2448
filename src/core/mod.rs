pub mod driver;
pub mod extractor;
pub mod literature;
pub mod simulation;

pub use crate::domain::model::{NormalizedArticle, SimulationState};
pub use crate::domain::ports::{LiteratureSource, RecordExtractor, Storage};
pub use crate::utils::error::Result;
