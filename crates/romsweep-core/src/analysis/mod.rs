pub mod collection;
pub mod grouping;
pub mod selection;

pub use collection::{AnalysisReport, CollectionAnalyzer, CollectionStats, GroupReport};
pub use grouping::group_by_title;
pub use selection::{Decision, KeepReason, SelectionPolicy};
