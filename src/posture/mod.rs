pub mod evaluator;
pub mod history;

pub use evaluator::PostureEvaluator;
pub use history::HistoryTracker;
