pub mod analysis;
pub mod classify;
pub mod config;
pub mod deletion;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod progress;
pub mod rules;
pub mod scanner;

pub use analysis::{AnalysisReport, CollectionAnalyzer, CollectionStats, Decision, KeepReason};
pub use classify::Classifier;
pub use crate::config::AppConfig;
pub use engine::{SweepEngine, SweepResult};
pub use error::Error;
pub use model::{BuildRank, DiscoveredFile, Regions, RomAttributes, RomRecord};
pub use progress::{ProgressReporter, SilentReporter};
pub use rules::RuleTables;
