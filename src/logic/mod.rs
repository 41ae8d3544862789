pub mod catalog;
pub mod data_sync;
pub mod fertilizer;
pub mod reference;
pub mod rules;
pub mod scorer;
pub mod soil_health;
pub mod validation;

pub use data_sync::DataSyncService;
pub use rules::RulesEngine;
pub use scorer::{CropScorer, ScoringMode};
